use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password is too long: maximum {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Invalid hashing cost: {0}")]
    InvalidCost(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
