use std::sync::Arc;

use chrono::Utc;
use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::create_user;
use super::handlers::get_user;
use super::handlers::login;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::authorization::authorize;
use crate::inbound::authorization::AuthenticatedUser;
use crate::inbound::authorization::AuthorizationError;
use crate::proto::user_service_server::UserService as UserServiceProto;
use crate::proto::CreateUserRequest;
use crate::proto::GetUserRequest;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::proto::UserResponse;

pub struct UserGrpcService {
    auth_service: Arc<dyn AuthServicePort>,
    user_service: Arc<dyn UserServicePort>,
}

impl UserGrpcService {
    pub fn new(
        auth_service: Arc<dyn AuthServicePort>,
        user_service: Arc<dyn UserServicePort>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
        }
    }

    /// Gate for protected calls, reading the `authorization` metadata entry.
    fn authenticate<T>(&self, request: &Request<T>) -> Result<AuthenticatedUser, Status> {
        let header = match request.metadata().get("authorization") {
            Some(value) => Some(value.to_str().map_err(|_| {
                Status::unauthenticated(AuthorizationError::InvalidHeader.to_string())
            })?),
            None => None,
        };

        authorize(self.auth_service.as_ref(), header, Utc::now())
            .map_err(|e| Status::unauthenticated(e.to_string()))
    }
}

#[tonic::async_trait]
impl UserServiceProto for UserGrpcService {
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let response =
            create_user::create_user(self.auth_service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let response = login::login(self.auth_service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let caller = self.authenticate(&request)?;
        tracing::debug!(caller_id = %caller.user_id, "gRPC GetUser");

        let response =
            get_user::get_user(self.user_service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
