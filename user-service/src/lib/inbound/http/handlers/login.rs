use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let email = EmailAddress::new(body.email).map_err(UserError::from)?;
    if body.password.is_empty() {
        return Err(ApiError::BadRequest("Password is required".to_string()));
    }

    state
        .auth_service
        .login(&email, &body.password, Utc::now())
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, LoginResponseData { token }))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

impl std::fmt::Debug for LoginRequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequestBody")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
