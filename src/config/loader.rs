//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;

pub const CONFIG_FILENAME: &str = "yoga.toml";

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// One year
const MAX_JWT_EXPIRATION_MS: i64 = 365 * 24 * 60 * 60 * 1000;

/// Load configuration from yoga.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    parse_config(&content)
}

/// Parse configuration text, interpolating environment variables first
pub fn parse_config(content: &str) -> Result<Config> {
    let content = interpolate_env_vars(content);
    let config: Config = toml::from_str(&content)?;

    let cost = config.security.bcrypt_cost;
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        return Err(Error::Config(format!(
            "security.bcrypt_cost must be {}-{}, got {}",
            MIN_BCRYPT_COST, MAX_BCRYPT_COST, cost
        )));
    }

    let ttl = config.security.jwt_expiration_ms;
    if !(1..=MAX_JWT_EXPIRATION_MS).contains(&ttl) {
        return Err(Error::Config(format!(
            "security.jwt_expiration_ms must be 1-{}, got {}",
            MAX_JWT_EXPIRATION_MS, ttl
        )));
    }

    Ok(config)
}

/// Find the configuration file, searching upward from current directory
pub fn find_config_file() -> Result<PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // This regex is a compile-time constant, panicking is acceptable here
    // as it indicates a programming error in the codebase, not a runtime issue
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a fresh signing secret for a new config file
pub fn generate_secret() -> String {
    format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}

/// Generate a default configuration file content
pub fn default_config_content(secret: &str) -> String {
    format!(
        r#"# Yoga Studio Configuration

[server]
host = "0.0.0.0"
port = 8080

[security]
# Signing secret for bearer tokens. Can be taken from the environment:
# jwt_secret = "${{YOGA_JWT_SECRET}}"
jwt_secret = "{secret}"
# Token lifetime (24 hours)
jwt_expiration_ms = 86400000
bcrypt_cost = 10

[database]
# Leave unset to run with the in-memory store
# url = "${{DATABASE_URL:-host=localhost user=postgres password=postgres dbname=yoga}}"
seed = true
"#
    )
}
