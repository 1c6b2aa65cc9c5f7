use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};

use super::types::SessionClaims;
use crate::shared::AppError;

/// Session tokens are valid for 24 hours from issuance.
const TOKEN_TTL_HOURS: i64 = 24;

/// Configuration for JWT token operations. Holds the process-wide signing
/// secret; constructed once at startup and shared read-only afterwards.
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
}

impl TokenConfig {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Creates a signed JWT asserting the given username, expiring in 24 hours
    #[instrument(skip(self, username))]
    pub fn create_token(&self, username: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;

        let claims = SessionClaims {
            username: username.to_string(),
            exp,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode JWT token");
            AppError::Signing(e.to_string())
        })
    }

    /// Validates a JWT token and returns the claims if valid
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| {
            debug!(
                username = %data.claims.username,
                exp = data.claims.exp,
                "JWT token decoded successfully"
            );
            data.claims
        })
        .map_err(|e| {
            debug!(error = %e, "Failed to decode JWT token");
            AppError::InvalidToken(e.to_string())
        })
    }
}
