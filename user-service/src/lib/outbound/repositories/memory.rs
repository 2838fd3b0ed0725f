use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local identity store.
///
/// Email uniqueness is checked and written under one write lock, so it holds
/// the same guarantee the Postgres unique constraint gives.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(users: &HashMap<UserId, User>, email: &EmailAddress, except: &UserId) -> bool {
    users
        .values()
        .any(|existing| existing.email == *email && existing.id != *except)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if email_taken(&users, &user.email, &user.id) {
            return Err(UserError::EmailConflict(user.email.to_string()));
        }
        if users.contains_key(&user.id) {
            return Err(UserError::Store(format!("Duplicate user id: {}", user.id)));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email == *email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        if email_taken(&users, &user.email, &user.id) {
            return Err(UserError::EmailConflict(user.email.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn count(&self) -> Result<u64, UserError> {
        Ok(self.users.read().await.len() as u64)
    }
}
