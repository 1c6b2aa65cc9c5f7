use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the accounts table
///
/// The password hash never leaves the server: it is skipped on
/// serialization so no response or log sink can carry it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AccountModel {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new account; the store assigns id and created_at
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl AccountModel {
    /// Builds a full record from an insert payload, used where the backing
    /// store does not assign identity itself (the in-memory repository)
    pub fn new(account: NewAccount) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            created_at: Utc::now(),
        }
    }
}
