//! bcrypt password hashing

use crate::error::{Error, Result};

/// Hashes and checks passwords. bcrypt runs on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct PasswordEncoder {
    cost: u32,
}

impl PasswordEncoder {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn encode(&self, raw: &str) -> Result<String> {
        let raw = raw.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(raw, cost))
            .await
            .map_err(|e| Error::Other(format!("Hashing task failed: {}", e)))?
            .map_err(Error::from)
    }

    /// A hash that bcrypt cannot parse never matches
    pub async fn matches(&self, raw: &str, hash: &str) -> Result<bool> {
        let raw = raw.to_string();
        let hash = hash.to_string();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(raw, &hash))
            .await
            .map_err(|e| Error::Other(format!("Hashing task failed: {}", e)))?;

        match verified {
            Ok(matched) => Ok(matched),
            Err(e) => {
                tracing::warn!("Encoded password does not look like bcrypt: {}", e);
                Ok(false)
            }
        }
    }
}
