//! Authentication models

use serde::{Deserialize, Serialize};

use crate::dto::validate::{field, Validate};
use crate::error::Result;
use crate::models::User;

/// The authenticated identity attached to a request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPrincipal {
    pub id: i64,
    /// Login name, the user's email
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
    #[serde(skip_serializing)]
    pub password: String,
}

impl UserPrincipal {
    /// Granted authorities. Access is decided on authentication alone.
    pub fn authorities(&self) -> Vec<String> {
        Vec::new()
    }

    pub fn is_account_non_expired(&self) -> bool {
        true
    }

    pub fn is_account_non_locked(&self) -> bool {
        true
    }

    pub fn is_credentials_non_expired(&self) -> bool {
        true
    }

    pub fn is_enabled(&self) -> bool {
        true
    }
}

impl PartialEq for UserPrincipal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for UserPrincipal {}

impl From<&User> for UserPrincipal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            username: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            admin: user.admin,
            password: user.password.clone(),
        }
    }
}

/// Login credentials
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<()> {
        field("email", &self.email).not_blank()?;
        field("password", &self.password).not_blank()?;
        Ok(())
    }
}

/// Registration form
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for SignupRequest {
    fn validate(&self) -> Result<()> {
        field("email", &self.email).not_blank()?.max(50)?.email()?;
        field("firstName", &self.first_name).not_blank()?.between(3, 20)?;
        field("lastName", &self.last_name).not_blank()?.between(3, 20)?;
        field("password", &self.password).not_blank()?.between(6, 40)?;
        Ok(())
    }
}

/// Login response with token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JwtResponse {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}

impl JwtResponse {
    pub fn new(token: String, principal: &UserPrincipal) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            id: principal.id,
            username: principal.username.clone(),
            first_name: principal.first_name.clone(),
            last_name: principal.last_name.clone(),
            admin: principal.admin,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
