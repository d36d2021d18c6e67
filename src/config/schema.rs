//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Server configuration for the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Token signing and password hashing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// HMAC secret used to sign bearer tokens
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Token lifetime in milliseconds
    #[serde(default = "default_jwt_expiration_ms")]
    pub jwt_expiration_ms: i64,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

pub const DEFAULT_JWT_SECRET: &str = "yoga-studio-secret-key-change-in-production";

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_jwt_expiration_ms() -> i64 {
    86_400_000
}

fn default_bcrypt_cost() -> u32 {
    10
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_expiration_ms: default_jwt_expiration_ms(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl SecurityConfig {
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

/// Persistence backend selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string. The in-memory store is used when unset.
    #[serde(default)]
    pub url: Option<String>,

    /// Seed the in-memory store with the studio admin and teachers
    #[serde(default = "default_seed")]
    pub seed: bool,
}

fn default_seed() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            seed: default_seed(),
        }
    }
}
