use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Identity claims carried by an access token.
///
/// Timestamps are Unix seconds, as in RFC 7519.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity identifier)
    pub sub: String,

    /// Email address of the identity at login time
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an identity issued at `now` and valid for `ttl`.
    ///
    /// # Errors
    /// * `EncodingFailed` - `now + ttl` is outside the representable time range
    pub fn for_identity(
        subject: impl ToString,
        email: impl ToString,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::EncodingFailed(format!("Expiry overflows with ttl {}", ttl))
        })?;

        Ok(Self {
            sub: subject.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Check if token is expired at `current_timestamp`.
    ///
    /// A token is still valid at the exact second of `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.exp
    }
}
