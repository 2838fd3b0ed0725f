use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserResponseData;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ListUsersResponseData>, ApiError> {
    let users = state.user_service.list_users().await?;
    let total = state.user_service.count_users().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ListUsersResponseData {
            users: users.iter().map(UserResponseData::from).collect(),
            total,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListUsersResponseData {
    pub users: Vec<UserResponseData>,
    pub total: u64,
}
