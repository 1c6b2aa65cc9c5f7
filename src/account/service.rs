use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{
    models::NewAccount,
    password::PasswordHasher,
    repository::AccountRepository,
    types::{LoginRequest, RegisterRequest},
};
use crate::session::token::TokenConfig;
use crate::shared::AppError;

/// Service for handling account business logic: registration and
/// credential-based session issuance
pub struct AccountService {
    repository: Arc<dyn AccountRepository + Send + Sync>,
    hasher: PasswordHasher,
    token_config: TokenConfig,
}

impl AccountService {
    pub fn new(
        repository: Arc<dyn AccountRepository + Send + Sync>,
        token_config: TokenConfig,
    ) -> Self {
        Self {
            repository,
            hasher: PasswordHasher::default(),
            token_config,
        }
    }

    /// Registers a new account and returns its id
    ///
    /// The plaintext password is hashed before anything touches the store
    /// and is dropped with the request; neither it nor the hash is returned.
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: RegisterRequest) -> Result<Uuid, AppError> {
        if request.username.is_empty() || request.email.is_empty() || request.password.is_empty() {
            return Err(AppError::Validation(
                "username, email and password are required".to_string(),
            ));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let account = self
            .repository
            .create(NewAccount {
                username: request.username,
                email: request.email,
                password_hash,
            })
            .await?;

        info!(account_id = %account.id, username = %account.username, "Account registered");
        Ok(account.id)
    }

    /// Verifies credentials and issues a session token
    ///
    /// Unknown email and wrong password both map to InvalidCredentials so
    /// the caller cannot tell which accounts exist.
    #[instrument(skip(self, request))]
    pub async fn authenticate(&self, request: LoginRequest) -> Result<String, AppError> {
        if request.email.is_empty() || request.password.is_empty() {
            return Err(AppError::Validation(
                "email and password are required".to_string(),
            ));
        }

        let account = match self.repository.find_by_email(&request.email).await? {
            Some(account) => account,
            None => {
                debug!("No account for submitted email");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !self.hasher.verify(&request.password, &account.password_hash)? {
            debug!(account_id = %account.id, "Password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.token_config.create_token(&account.username)?;

        info!(account_id = %account.id, username = %account.username, "Session token issued");
        Ok(token)
    }
}
