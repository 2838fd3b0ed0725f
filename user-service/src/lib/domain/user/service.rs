use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user management.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn count_users(&self) -> Result<u64, UserError> {
        self.repository.count().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            if new_email != user.email {
                if self.repository.find_by_email(&new_email).await?.is_some() {
                    return Err(UserError::EmailConflict(new_email.to_string()));
                }
                user.email = new_email;
            }
        }

        if let Some(new_name) = command.name {
            user.name = new_name;
        }

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::DisplayName;
    use crate::domain::user::models::EmailAddress;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
            async fn count(&self) -> Result<u64, UserError>;
        }
    }

    fn user(id: UserId, name: &str, email: &str) -> User {
        User {
            id,
            name: DisplayName::new(name.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        let returned_user = user(user_id, "Ada", "ada@example.com");
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = UserService::new(Arc::new(repository));

        let user = service.get_user(&user_id).await.unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.name.as_str(), "Ada");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_and_count_users() {
        let mut repository = MockTestUserRepository::new();

        let users = vec![
            user(UserId::new(), "Ada", "ada@example.com"),
            user(UserId::new(), "Grace", "grace@example.com"),
        ];
        let returned_users = users.clone();
        repository
            .expect_list_all()
            .times(1)
            .returning(move || Ok(returned_users.clone()));
        repository.expect_count().times(1).returning(|| Ok(2));

        let service = UserService::new(Arc::new(repository));

        assert_eq!(service.list_users().await.unwrap(), users);
        assert_eq!(service.count_users().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_user_success() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        let existing_user = user(user_id, "Ada", "ada@example.com");
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(existing_user.clone())));
        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "lovelace@example.com")
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_update()
            .withf(|user| {
                user.name.as_str() == "Ada Lovelace"
                    && user.email.as_str() == "lovelace@example.com"
                    && user.password_hash == "$argon2id$test_hash"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            name: Some(DisplayName::new("Ada Lovelace".to_string()).unwrap()),
            email: Some(EmailAddress::new("lovelace@example.com".to_string()).unwrap()),
        };

        let updated_user = service.update_user(&user_id, command).await.unwrap();
        assert_eq!(updated_user.name.as_str(), "Ada Lovelace");
        assert_eq!(updated_user.email.as_str(), "lovelace@example.com");
    }

    #[tokio::test]
    async fn test_update_user_same_email_skips_conflict_check() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        let existing_user = user(user_id, "Ada", "ada@example.com");
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing_user.clone())));
        repository.expect_find_by_email().times(0);
        repository
            .expect_update()
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            name: Some(DisplayName::new("Countess".to_string()).unwrap()),
            email: Some(EmailAddress::new("ada@example.com".to_string()).unwrap()),
        };

        let updated_user = service.update_user(&user_id, command).await.unwrap();
        assert_eq!(updated_user.name.as_str(), "Countess");
    }

    #[tokio::test]
    async fn test_update_user_email_conflict() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        let existing_user = user(user_id, "Ada", "ada@example.com");
        let other_user = user(UserId::new(), "Grace", "grace@example.com");
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing_user.clone())));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(other_user.clone())));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            name: None,
            email: Some(EmailAddress::new("grace@example.com".to_string()).unwrap()),
        };

        let result = service.update_user(&user_id, command).await;
        assert_eq!(
            result,
            Err(UserError::EmailConflict("grace@example.com".to_string()))
        );
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            name: Some(DisplayName::new("Ada".to_string()).unwrap()),
            email: None,
        };

        let result = service.update_user(&UserId::new(), command).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        repository
            .expect_delete()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository));

        assert!(service.delete_user(&user_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        repository
            .expect_delete()
            .times(1)
            .returning(move |_| Err(UserError::NotFound(user_id.to_string())));

        let service = UserService::new(Arc::new(repository));

        let result = service.delete_user(&user_id).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
