use chrono::{DateTime, Utc};

/// A registered studio member
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Assigned by the store on first save
    pub id: Option<i64>,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    /// bcrypt hash, never the raw password
    pub password: String,
    pub admin: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create an unsaved user
    pub fn new(
        email: impl Into<String>,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        password: impl Into<String>,
        admin: bool,
    ) -> Self {
        Self {
            id: None,
            email: email.into(),
            last_name: last_name.into(),
            first_name: first_name.into(),
            password: password.into(),
            admin,
            created_at: None,
            updated_at: None,
        }
    }
}
