use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::inbound::authorization::authorize;
use crate::inbound::authorization::AuthorizationError;
use crate::inbound::http::router::AppState;

/// Middleware that validates JWT tokens and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let authorization = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| unauthorized(AuthorizationError::InvalidHeader))?,
        ),
        None => None,
    };

    let user = authorize(state.auth_service.as_ref(), authorization, Utc::now())
        .map_err(unauthorized)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

fn unauthorized(err: AuthorizationError) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": err.to_string()
        })),
    )
        .into_response()
}
