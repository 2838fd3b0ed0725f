use auth::AuthenticationError;
use auth::JwtError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for DisplayName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password too long: maximum {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all user and authentication operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] DisplayNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Email already exists: {0}")]
    EmailConflict(String),

    /// Deliberately carries no detail: unknown email and wrong password are
    /// the same error.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    Hashing(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    // Infrastructure errors
    #[error("Store error: {0}")]
    Store(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<AuthenticationError> for UserError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
            AuthenticationError::PasswordError(e) => UserError::Hashing(e),
            AuthenticationError::JwtError(e) => UserError::Token(e),
            AuthenticationError::InvalidConfig(msg) => UserError::Unknown(msg),
        }
    }
}

impl From<tokio::task::JoinError> for UserError {
    fn from(err: tokio::task::JoinError) -> Self {
        UserError::Unknown(format!("Blocking task failed: {}", err))
    }
}
