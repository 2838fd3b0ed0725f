//! Authentication utilities library
//!
//! Provides the credential and session-token core used by the user service:
//! - Password hashing (Argon2id with a configurable cost)
//! - JWT issuance and validation (HS256, time-bounded)
//! - Authentication coordination
//!
//! All settings come from an [`AuthConfig`] value constructed once at startup.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::{Duration, Utc};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1));
//! let now = Utc::now();
//! let token = handler.issue("user123", "ada@example.com", now).unwrap();
//! let claims = handler.validate(&token, now).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AuthConfig, Authenticator};
//! use chrono::{Duration, Utc};
//!
//! let auth = Authenticator::new(&AuthConfig {
//!     secret: b"secret_key_at_least_32_bytes_long!".to_vec(),
//!     token_ttl: Duration::hours(24),
//!     hash_cost: 1,
//! })
//! .unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let now = Utc::now();
//! let result = auth
//!     .authenticate("password123", &hash, "user123", "ada@example.com", now)
//!     .unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token, now).unwrap();
//! assert_eq!(claims.email, "ada@example.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthConfig;
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
