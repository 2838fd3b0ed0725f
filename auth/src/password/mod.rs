pub mod errors;
pub mod hasher;

pub use self::errors::PasswordError;
pub use self::hasher::PasswordHasher;
pub use self::hasher::MAX_PASSWORD_BYTES;
