use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::authorization::AuthenticatedUser;

/// Echo the identity the gate attached to this request.
pub async fn me(
    Extension(caller): Extension<AuthenticatedUser>,
) -> ApiSuccess<MeResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        MeResponseData {
            user_id: caller.user_id.to_string(),
            email: caller.email,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub user_id: String,
    pub email: String,
}
