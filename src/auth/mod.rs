//! Token issuance and validation.

pub mod middleware;
pub mod password;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// JWT claims carried by every authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub login: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Issues and validates HS256 tokens for a single shared secret.
pub struct TokenManager {
    secret: String,
    expiration: Duration,
}

impl TokenManager {
    pub fn new(secret: impl Into<String>, expiration: Duration) -> Self {
        Self {
            secret: secret.into(),
            expiration,
        }
    }

    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    /// Generate a token for the given user.
    pub fn generate(&self, user_id: Uuid, login: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::from_std(self.expiration).unwrap_or_default();

        let claims = Claims {
            user_id,
            login: login.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(token)
    }

    /// Validate a token and return its claims.
    ///
    /// Only HMAC-SHA256 signatures are accepted; expiry is enforced.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);

        let data =
            decode::<Claims>(token, &decoding_key, &validation).map_err(|_| TokenError::Invalid)?;
        Ok(data.claims)
    }
}
