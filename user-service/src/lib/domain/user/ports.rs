use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user management operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Store` - Store operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve all users, newest first.
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Count registered users.
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn count_users(&self) -> Result<u64, UserError>;

    /// Update name and/or email of an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailConflict` - New email is already registered
    /// * `Store` - Store operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Store` - Store operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
///
/// Implementations must enforce email uniqueness themselves; callers treat
/// any pre-check they do as advisory.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailConflict` - Email is already registered
    /// * `Store` - Store operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by exact email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve all users from storage, newest first.
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Replace an existing user in storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailConflict` - New email is already registered
    /// * `Store` - Store operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Store` - Store operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;

    /// Count stored users.
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn count(&self) -> Result<u64, UserError>;
}
