use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Option<i64>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub admin: bool,
    /// Accepted on input, never written back out
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            last_name: user.last_name.clone(),
            first_name: user.first_name.clone(),
            admin: user.admin,
            password: Some(user.password.clone()),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
