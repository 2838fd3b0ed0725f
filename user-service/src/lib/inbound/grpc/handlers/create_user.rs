use tonic::Status;

use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::proto::CreateUserRequest;
use crate::proto::UserResponse;
use crate::user::errors::UserError;

pub async fn create_user(
    service: &dyn AuthServicePort,
    request: CreateUserRequest,
) -> Result<UserResponse, Status> {
    let command = try_into_command(request)?;
    let user = service.register(command).await?;

    Ok((&user).into())
}

fn try_into_command(request: CreateUserRequest) -> Result<RegisterCommand, UserError> {
    Ok(RegisterCommand::new(
        DisplayName::new(request.name)?,
        EmailAddress::new(request.email)?,
        Password::new(request.password)?,
    ))
}
