//! JWT token handling

use crate::auth::models::UserPrincipal;
use crate::config::SecurityConfig;
use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject (the user's email)
    pub sub: String,
    /// Issued at, seconds since the epoch
    pub iat: i64,
    /// Expiration, seconds since the epoch
    pub exp: i64,
}

impl Claims {
    /// Check if token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Why a bearer token was refused
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenRejection {
    #[error("Invalid JWT signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid JWT token: {0}")]
    Malformed(String),

    #[error("JWT token is expired: {0}")]
    Expired(String),

    #[error("JWT token is unsupported: {0}")]
    Unsupported(String),

    #[error("JWT claims string is empty: {0}")]
    Empty(String),
}

impl From<jsonwebtoken::errors::Error> for TokenRejection {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        let detail = err.to_string();
        match err.kind() {
            ErrorKind::InvalidSignature => TokenRejection::InvalidSignature(detail),
            ErrorKind::ExpiredSignature => TokenRejection::Expired(detail),
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingRequiredClaim(_) => TokenRejection::Unsupported(detail),
            _ => TokenRejection::Malformed(detail),
        }
    }
}

/// Issues and checks HS512 bearer tokens
#[derive(Clone)]
pub struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    expiration: Duration,
}

impl JwtService {
    pub fn new(secret: &str, expiration_ms: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiration: Duration::try_milliseconds(expiration_ms).unwrap_or(Duration::MAX),
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expiration_ms)
    }

    /// Sign a token whose subject is the principal's username
    pub fn generate_token(&self, principal: &UserPrincipal) -> Result<String> {
        self.issue(&principal.username, Utc::now())
    }

    fn issue(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String> {
        let expires_at = issued_at
            .checked_add_signed(self.expiration)
            .ok_or_else(|| Error::Config("JWT expiration is out of range".to_string()))?;
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS512), &claims, &self.encoding)?)
    }

    /// Decode a token, classifying any failure
    pub fn inspect(&self, token: &str) -> std::result::Result<Claims, TokenRejection> {
        if token.trim().is_empty() {
            return Err(TokenRejection::Empty("token is blank".to_string()));
        }

        let claims = decode::<Claims>(token, &self.decoding, &self.validation)?.claims;

        // The library accepts exp == now
        if claims.is_expired() {
            return Err(TokenRejection::Expired(format!(
                "expired at {}",
                claims.exp
            )));
        }

        Ok(claims)
    }

    pub fn validate_token(&self, token: &str) -> bool {
        match self.inspect(token) {
            Ok(_) => true,
            Err(rejection) => {
                error!("{}", rejection);
                false
            }
        }
    }

    pub fn username_from_token(&self, token: &str) -> Result<String> {
        self.inspect(token)
            .map(|claims| claims.sub)
            .map_err(|rejection| Error::Unauthorized(rejection.to_string()))
    }
}
