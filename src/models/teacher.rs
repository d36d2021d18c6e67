use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Teacher {
    pub id: Option<i64>,
    pub last_name: String,
    pub first_name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Teacher {
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            id: None,
            last_name: last_name.into(),
            first_name: first_name.into(),
            created_at: None,
            updated_at: None,
        }
    }
}
