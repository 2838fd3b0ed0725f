use axum::extract::State;
use axum::Extension;
use axum::Json;

use super::register::register;
use super::register::RegisterRequest;
use super::ApiError;
use super::ApiSuccess;
use super::UserResponseData;
use crate::inbound::authorization::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Create a user on behalf of an authenticated caller. Same rules as registration.
pub async fn create_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    body: Json<RegisterRequest>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    tracing::debug!(caller_id = %caller.user_id, "Creating user");
    register(State(state), body).await
}
