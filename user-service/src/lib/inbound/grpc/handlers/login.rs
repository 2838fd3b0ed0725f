use chrono::Utc;
use tonic::Status;

use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::user::errors::UserError;

pub async fn login(
    service: &dyn AuthServicePort,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    let email = EmailAddress::new(request.email).map_err(UserError::from)?;
    if request.password.is_empty() {
        return Err(Status::invalid_argument("Password is required"));
    }

    let token = service.login(&email, &request.password, Utc::now()).await?;

    Ok(LoginResponse { token })
}
