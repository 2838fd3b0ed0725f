use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Authentication core: registration, login and token validation.
///
/// Password hashing and verification run on the blocking thread pool so a
/// slow hash never stalls the async workers.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new authentication service.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Hasher and token handler built from startup configuration
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError> {
        // Fast path only: the store's unique constraint decides races.
        if self.repository.find_by_email(&command.email).await?.is_some() {
            return Err(UserError::EmailConflict(command.email.to_string()));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.as_str()))
                .await??;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<String, UserError> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            tracing::info!("Login rejected");
            return Err(UserError::InvalidCredentials);
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();
        let stored_hash = user.password_hash.clone();
        let subject = user.id.to_string();
        let email = user.email.as_str().to_string();

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &subject, &email, now)
        })
        .await?;

        match result {
            Ok(result) => {
                tracing::info!(user_id = %user.id, "Login succeeded");
                Ok(result.access_token)
            }
            Err(e) => {
                let err = UserError::from(e);
                if err == UserError::InvalidCredentials {
                    tracing::info!("Login rejected");
                } else {
                    tracing::error!(user_id = %user.id, error = %err, "Login failed");
                }
                Err(err)
            }
        }
    }

    fn validate_token(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, UserError> {
        self.authenticator
            .validate_token(token, now)
            .map_err(UserError::from)
    }
}

#[cfg(test)]
mod tests {
    use auth::AuthConfig;
    use auth::JwtError;
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::DisplayName;
    use crate::domain::user::models::Password;

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

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(
            Authenticator::new(&AuthConfig {
                secret: b"test-secret-key-for-jwt-signing-at-least-32-bytes".to_vec(),
                token_ttl: Duration::hours(1),
                hash_cost: 1,
            })
            .unwrap(),
        )
    }

    fn command(name: &str, email: &str, password: &str) -> RegisterCommand {
        RegisterCommand::new(
            DisplayName::new(name.to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new(password.to_string()).unwrap(),
        )
    }

    fn stored_user(authenticator: &Authenticator, email: &str, password: &str) -> User {
        User {
            id: UserId::new(),
            name: DisplayName::new("Ada".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "ada@example.com")
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.name.as_str() == "Ada"
                    && user.email.as_str() == "ada@example.com"
                    && user.password_hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let user = service
            .register(command("Ada", "ada@example.com", "secret123"))
            .await
            .unwrap();

        assert_eq!(user.name.as_str(), "Ada");
        assert_eq!(user.email.as_str(), "ada@example.com");
        assert_ne!(user.password_hash, "secret123");
    }

    #[tokio::test]
    async fn test_register_existing_email() {
        let mut repository = MockTestUserRepository::new();
        let authenticator = authenticator();

        let existing = stored_user(&authenticator, "ada@example.com", "secret123");
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_create().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator);

        let result = service
            .register(command("Someone Else", "ada@example.com", "different456"))
            .await;
        assert_eq!(
            result,
            Err(UserError::EmailConflict("ada@example.com".to_string()))
        );
    }

    #[tokio::test]
    async fn test_register_lost_race_surfaces_conflict() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_create().times(1).returning(|user| {
            Err(UserError::EmailConflict(user.email.as_str().to_string()))
        });

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service
            .register(command("Ada", "ada@example.com", "secret123"))
            .await;
        assert_eq!(
            result,
            Err(UserError::EmailConflict("ada@example.com".to_string()))
        );
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestUserRepository::new();
        let authenticator = authenticator();

        let existing = stored_user(&authenticator, "ada@example.com", "secret123");
        let user_id = existing.id;
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);
        let now = Utc::now();
        let email = EmailAddress::new("ada@example.com".to_string()).unwrap();

        let token = service.login(&email, "secret123", now).await.unwrap();

        let claims = service.validate_token(&token, now).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let authenticator = authenticator();
        let existing = stored_user(&authenticator, "ada@example.com", "secret123");

        let mut known = MockTestUserRepository::new();
        known
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let mut unknown = MockTestUserRepository::new();
        unknown
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let known = AuthService::new(Arc::new(known), Arc::clone(&authenticator));
        let unknown = AuthService::new(Arc::new(unknown), authenticator);
        let now = Utc::now();

        let wrong_password = known
            .login(
                &EmailAddress::new("ada@example.com".to_string()).unwrap(),
                "wrong",
                now,
            )
            .await
            .unwrap_err();
        let unknown_email = unknown
            .login(
                &EmailAddress::new("nobody@example.com".to_string()).unwrap(),
                "secret123",
                now,
            )
            .await
            .unwrap_err();

        assert_eq!(wrong_password, UserError::InvalidCredentials);
        assert_eq!(wrong_password, unknown_email);
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_login_malformed_stored_hash() {
        let mut repository = MockTestUserRepository::new();
        let authenticator = authenticator();

        let mut existing = stored_user(&authenticator, "ada@example.com", "secret123");
        existing.password_hash = "corrupted".to_string();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);
        let email = EmailAddress::new("ada@example.com".to_string()).unwrap();

        let result = service.login(&email, "secret123", Utc::now()).await;
        assert!(matches!(result, Err(UserError::Hashing(_))));
    }

    #[tokio::test]
    async fn test_login_unusable_stored_hash() {
        let mut repository = MockTestUserRepository::new();
        let authenticator = authenticator();

        let mut existing = stored_user(&authenticator, "ada@example.com", "secret123");
        existing.password_hash =
            "$argon2id$v=19$m=19456,t=1,p=1$c29tZXNhbHRzb21lc2FsdA".to_string();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);
        let email = EmailAddress::new("ada@example.com".to_string()).unwrap();

        let result = service.login(&email, "secret123", Utc::now()).await;
        assert!(matches!(result, Err(UserError::Hashing(_))));
    }

    #[tokio::test]
    async fn test_login_propagates_store_error() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(UserError::Store("connection reset".to_string())));

        let service = AuthService::new(Arc::new(repository), authenticator());
        let email = EmailAddress::new("ada@example.com".to_string()).unwrap();

        let result = service.login(&email, "secret123", Utc::now()).await;
        assert_eq!(
            result,
            Err(UserError::Store("connection reset".to_string()))
        );
    }

    #[tokio::test]
    async fn test_validate_expired_token() {
        let repository = MockTestUserRepository::new();
        let authenticator = authenticator();

        let issued_at = Utc::now() - Duration::hours(2);
        let token = authenticator
            .generate_token("user123", "ada@example.com", issued_at)
            .unwrap();

        let service = AuthService::new(Arc::new(repository), authenticator);

        assert_eq!(
            service.validate_token(&token, Utc::now()),
            Err(UserError::Token(JwtError::TokenExpired))
        );
    }
}
