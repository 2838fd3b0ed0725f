use tonic::Status;

use crate::domain::user::models::User;
use crate::proto::UserResponse;
use crate::user::errors::UserError;

pub mod create_user;
pub mod get_user;
pub mod login;

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

impl From<UserError> for Status {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => Status::not_found(err.to_string()),
            UserError::EmailConflict(_) => Status::already_exists(err.to_string()),
            UserError::InvalidCredentials => Status::unauthenticated(err.to_string()),
            UserError::InvalidUserId(_)
            | UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_) => Status::invalid_argument(err.to_string()),
            UserError::Hashing(_)
            | UserError::Token(_)
            | UserError::Store(_)
            | UserError::Unknown(_) => {
                tracing::error!(error = %err, "gRPC request failed");
                Status::internal("Internal server error")
            }
        }
    }
}
