use tonic::Status;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::proto::GetUserRequest;
use crate::proto::UserResponse;
use crate::user::errors::UserError;

pub async fn get_user(
    service: &dyn UserServicePort,
    request: GetUserRequest,
) -> Result<UserResponse, Status> {
    let user_id = UserId::from_string(&request.id).map_err(UserError::from)?;
    let user = service.get_user(&user_id).await?;

    Ok((&user).into())
}
