use async_trait::async_trait;
use auth::Claims;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// Port for registration, login and token validation.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new identity.
    ///
    /// # Arguments
    /// * `command` - Validated name, email and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailConflict` - Email is already registered (pre-check or store constraint)
    /// * `Hashing` - Password hashing failed
    /// * `Store` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `email` - Email to look up (exact match)
    /// * `password` - Plaintext password
    /// * `now` - Token issue time
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, indistinguishably
    /// * `Hashing` - Stored hash is malformed
    /// * `Token` - Token signing failed
    /// * `Store` - Store operation failed
    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<String, UserError>;

    /// Validate an access token at `now`.
    ///
    /// # Errors
    /// * `Token` - Token is malformed, tampered, uses another algorithm, or expired
    fn validate_token(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, UserError>;
}
