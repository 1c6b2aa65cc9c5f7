use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

use crate::account::service::AccountService;
use crate::session::token::TokenConfig;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub token_config: TokenConfig,
}

impl AppState {
    pub fn new(account_service: Arc<AccountService>, token_config: TokenConfig) -> Self {
        Self {
            account_service,
            token_config,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Username or email already exists")]
    DuplicateAccount,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error("Token signing error: {0}")]
    Signing(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::DuplicateAccount => (
                StatusCode::CONFLICT,
                "Username or email already exists".to_string(),
            ),
            // Lookup-miss and password-mismatch share this variant so the
            // two failure paths cannot diverge in any observable way.
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            AppError::InvalidToken(detail) => {
                warn!(detail = %detail, "Rejected bearer token");
                (
                    StatusCode::UNAUTHORIZED,
                    "Invalid or expired token".to_string(),
                )
            }
            // Internal faults are logged with full detail server-side but the
            // caller only ever sees a generic message.
            AppError::Hashing(detail) | AppError::Signing(detail) | AppError::Database(detail) => {
                error!(detail = %detail, "Internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
