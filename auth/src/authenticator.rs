use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Immutable authentication settings, built once at startup.
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC signing secret
    pub secret: Vec<u8>,
    /// Lifetime of issued access tokens
    pub token_ttl: Duration,
    /// Password hashing cost factor
    pub hash_cost: u32,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"[redacted]")
            .field("token_ttl", &self.token_ttl)
            .field("hash_cost", &self.hash_cost)
            .finish()
    }
}

/// Authentication coordinator combining password verification and JWT generation.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid authentication configuration: {0}")]
    InvalidConfig(String),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Errors
    /// * `InvalidConfig` - Secret is empty or TTL is not positive
    /// * `PasswordError` - Hash cost is outside the accepted range
    pub fn new(config: &AuthConfig) -> Result<Self, AuthenticationError> {
        if config.secret.is_empty() {
            return Err(AuthenticationError::InvalidConfig(
                "signing secret must not be empty".to_string(),
            ));
        }

        if config.token_ttl <= Duration::zero() {
            return Err(AuthenticationError::InvalidConfig(
                "token ttl must be positive".to_string(),
            ));
        }

        Ok(Self {
            password_hasher: PasswordHasher::with_cost(config.hash_cost)?,
            jwt_handler: JwtHandler::new(&config.secret, config.token_ttl),
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity identifier placed in `sub`
    /// * `email` - Identity email placed in the claims
    /// * `now` - Issue time
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.issue(subject, email, now)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(
        &self,
        subject: &str,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, email, now)
    }

    /// Validate a token at `now` and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, tampered, signed with another algorithm, or expired
    pub fn validate_token(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        self.jwt_handler.validate(token, now)
    }
}
