use thiserror::Error;

/// Error type for token operations.
///
/// The validation variants carry the rejection reason for logging; callers
/// facing end users should collapse them into a single "invalid or expired
/// token" message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Signing secret is empty")]
    EmptySecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token algorithm is not accepted: {0}")]
    WrongAlgorithm(String),
}
