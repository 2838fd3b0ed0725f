use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler for issuing and validating access tokens.
///
/// Tokens are signed with HS256 (HMAC with SHA-256) and carry [`Claims`].
/// Validation is stateless: a token is valid iff its signature matches the
/// shared secret and the current time is not past `exp`.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
    has_secret: bool,
}

impl JwtHandler {
    /// Create a new JWT handler.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `ttl` - Lifetime of issued tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
            has_secret: !secret.is_empty(),
        }
    }

    /// Issue a signed token for an identity.
    ///
    /// # Arguments
    /// * `subject` - Identity identifier (`sub`)
    /// * `email` - Identity email address
    /// * `now` - Issue time (`iat`); `exp` is `now + ttl`
    ///
    /// # Errors
    /// * `EmptySecret` - Handler was built without a signing secret
    /// * `EncodingFailed` - Token encoding failed or `exp` overflows
    pub fn issue(&self, subject: &str, email: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims::for_identity(subject, email, now, self.ttl)?;
        self.encode(&claims)
    }

    /// Sign arbitrary claims.
    ///
    /// # Errors
    /// * `EmptySecret` - Handler was built without a signing secret
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        if !self.has_secret {
            return Err(JwtError::EmptySecret);
        }

        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and return its claims.
    ///
    /// The header must name HS256 exactly; `none` and every other algorithm
    /// are refused before the signature is looked at.
    ///
    /// # Arguments
    /// * `token` - JWT token string
    /// * `now` - Time the token is checked against
    ///
    /// # Errors
    /// * `EmptySecret` - Handler was built without a signing secret
    /// * `Malformed` - Token is not three base64url JSON segments with the expected claims
    /// * `WrongAlgorithm` - Header names an algorithm other than HS256
    /// * `BadSignature` - Signature does not match the secret
    /// * `TokenExpired` - `now` is past `exp`
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        if !self.has_secret {
            return Err(JwtError::EmptySecret);
        }

        self.check_structure(token)?;

        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked against the caller's clock below.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    // Header and payload decoded above, so a base64 failure here
                    // can only come from the signature segment.
                    ErrorKind::InvalidSignature | ErrorKind::Base64(_) => JwtError::BadSignature,
                    ErrorKind::InvalidAlgorithm => JwtError::WrongAlgorithm(e.to_string()),
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }

    fn check_structure(&self, token: &str) -> Result<(), JwtError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header, payload, _signature] = segments.as_slice() else {
            return Err(JwtError::Malformed(format!(
                "expected 3 segments, got {}",
                segments.len()
            )));
        };

        let header: serde_json::Value = decode_segment(header, "header")?;
        let algorithm = header
            .get("alg")
            .and_then(|alg| alg.as_str())
            .ok_or_else(|| JwtError::Malformed("header has no alg".to_string()))?;

        if algorithm != "HS256" {
            return Err(JwtError::WrongAlgorithm(algorithm.to_string()));
        }

        decode_segment::<Claims>(payload, "payload")?;

        Ok(())
    }
}

fn decode_segment<T: serde::de::DeserializeOwned>(
    segment: &str,
    name: &str,
) -> Result<T, JwtError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| JwtError::Malformed(format!("{} is not base64url: {}", name, e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| JwtError::Malformed(format!("{} is not valid: {}", name, e)))
}
