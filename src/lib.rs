// Library crate for the user account service
// This file exposes the public API for integration tests

pub mod account;
pub mod config;
pub mod session;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use account::{
    models::AccountModel, repository::AccountRepository, service::AccountService,
};
pub use session::{SessionClaims, TokenConfig};
pub use shared::{AppError, AppState};
