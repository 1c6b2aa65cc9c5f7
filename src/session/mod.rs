// Public API - what other modules can use
pub use middleware::jwt_auth;
pub use token::TokenConfig;
pub use types::SessionClaims;

// Internal modules
mod middleware;
pub mod token;
pub mod types;
