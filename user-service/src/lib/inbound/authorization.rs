use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::UserId;

/// Authenticated caller, attached to the request once the token checks out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

/// Reasons a request is turned away at the gate.
///
/// The display strings are what callers see; token failure details are only
/// logged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    InvalidHeader,

    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Extract the token from an `Authorization` header value.
///
/// The value must be exactly two parts separated by a single space, the scheme
/// must be `Bearer` in any letter case and the token must not be empty.
pub fn bearer_token(header: &str) -> Result<&str, AuthorizationError> {
    let mut parts = header.split(' ');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Ok(token)
        }
        _ => Err(AuthorizationError::InvalidHeader),
    }
}

/// Run the full gate: header parsing, token validation and identity extraction.
///
/// `header` is `None` when the request carried no authorization value at all.
pub fn authorize(
    auth_service: &dyn AuthServicePort,
    header: Option<&str>,
    now: DateTime<Utc>,
) -> Result<AuthenticatedUser, AuthorizationError> {
    let header = header.ok_or(AuthorizationError::MissingHeader)?;
    let token = bearer_token(header)?;

    let claims = auth_service.validate_token(token, now).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        AuthorizationError::InvalidToken
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a user id");
        AuthorizationError::InvalidToken
    })?;

    Ok(AuthenticatedUser {
        user_id,
        email: claims.email,
    })
}
