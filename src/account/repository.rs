use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::{AccountModel, NewAccount};
use crate::shared::AppError;

/// Trait for account repository operations
#[async_trait]
pub trait AccountRepository {
    /// Inserts a new account atomically: a duplicate username or email must
    /// surface as DuplicateAccount, even under concurrent callers.
    async fn create(&self, account: NewAccount) -> Result<AccountModel, AppError>;

    /// Looks up the full record (including hash) by email; None when absent
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountModel>, AppError>;
}

/// In-memory implementation of AccountRepository for development and testing
///
/// This provides a realistic implementation that can be used in development
/// without requiring a real database connection. Data is stored in memory
/// and will be lost when the application restarts.
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<Uuid, AccountModel>>,
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAccountRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current number of accounts in the repository
    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    #[instrument(skip(self, account))]
    async fn create(&self, account: NewAccount) -> Result<AccountModel, AppError> {
        debug!(username = %account.username, email = %account.email, "Creating account in memory");

        // Uniqueness check and insert happen under one lock, mirroring the
        // database unique constraints.
        let mut accounts = self.accounts.lock().unwrap();
        if accounts
            .values()
            .any(|a| a.username == account.username || a.email == account.email)
        {
            warn!(username = %account.username, "Account already exists in memory");
            return Err(AppError::DuplicateAccount);
        }

        let model = AccountModel::new(account);
        accounts.insert(model.id, model.clone());

        debug!(account_id = %model.id, "Account created successfully in memory");
        Ok(model)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountModel>, AppError> {
        debug!(email = %email, "Fetching account from memory");

        let accounts = self.accounts.lock().unwrap();
        let account = accounts.values().find(|a| a.email == email).cloned();

        match &account {
            Some(a) => debug!(account_id = %a.id, "Account found in memory"),
            None => debug!(email = %email, "Account not found in memory"),
        }

        Ok(account)
    }
}

/// PostgreSQL implementation of account repository
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    #[instrument(skip(self, account))]
    async fn create(&self, account: NewAccount) -> Result<AccountModel, AppError> {
        debug!(username = %account.username, email = %account.email, "Creating account in database");

        let model = sqlx::query_as::<_, AccountModel>(
            "INSERT INTO accounts (username, email, password_hash) VALUES ($1, $2, $3) \
             RETURNING id, username, email, password_hash, created_at",
        )
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            // Unique constraints on username and email make the insert the
            // atomic duplicate check; no check-then-insert window.
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                warn!(username = %account.username, "Account already exists in database");
                AppError::DuplicateAccount
            }
            _ => {
                warn!(error = %e, "Failed to create account in database");
                AppError::Database(e.to_string())
            }
        })?;

        debug!(account_id = %model.id, "Account created successfully in database");
        Ok(model)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountModel>, AppError> {
        debug!(email = %email, "Fetching account from database");

        let account = sqlx::query_as::<_, AccountModel>(
            "SELECT id, username, email, password_hash, created_at \
             FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch account from database");
            AppError::Database(e.to_string())
        })?;

        match &account {
            Some(a) => debug!(account_id = %a.id, "Account found in database"),
            None => debug!(email = %email, "Account not found in database"),
        }

        Ok(account)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Arc;

    /// Test helper functions for creating test data
    mod helpers {
        use super::*;

        pub fn new_account(username: &str, email: &str) -> NewAccount {
            NewAccount {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: format!("$2b$12$hash-for-{username}"),
            }
        }
    }

    use helpers::*;

    #[tokio::test]
    async fn test_create_and_find_account() {
        let repo = InMemoryAccountRepository::new();

        let created = repo.create(new_account("alice", "a@x.com")).await.unwrap();
        assert!(!created.id.is_nil());

        let found = repo.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.username, "alice");
        assert_eq!(found.password_hash, created.password_hash);
    }

    #[tokio::test]
    async fn test_find_nonexistent_account() {
        let repo = InMemoryAccountRepository::new();

        let result = repo.find_by_email("nobody@x.com").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryAccountRepository::new();

        repo.create(new_account("alice", "a@x.com")).await.unwrap();

        // Same email, different username
        let result = repo.create(new_account("bob", "a@x.com")).await;
        assert!(matches!(result, Err(AppError::DuplicateAccount)));
        assert_eq!(repo.account_count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = InMemoryAccountRepository::new();

        repo.create(new_account("alice", "a@x.com")).await.unwrap();

        // Same username, different email
        let result = repo.create(new_account("alice", "other@x.com")).await;
        assert!(matches!(result, Err(AppError::DuplicateAccount)));
        assert_eq!(repo.account_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_one_winner() {
        let repo = Arc::new(InMemoryAccountRepository::new());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.create(new_account(&format!("user-{i}"), "shared@x.com"))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(AppError::DuplicateAccount) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 3);
        assert_eq!(repo.account_count(), 1);
    }
}
