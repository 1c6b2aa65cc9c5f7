use crate::shared::AppError;

/// bcrypt cost factor, fixed for the process lifetime
const HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// Salted, adaptive-cost password hashing via bcrypt
///
/// Each call to `hash` draws a fresh salt, so hashing the same password
/// twice yields two different stored hashes that both verify.
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: HASH_COST }
    }
}

impl PasswordHasher {
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost).map_err(|e| AppError::Hashing(e.to_string()))
    }

    /// Returns Ok(false) on mismatch; errors only when the stored hash
    /// itself is malformed. Comparison timing is bcrypt's own.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        bcrypt::verify(password, hash).map_err(|e| AppError::Hashing(e.to_string()))
    }
}
