use argon2::password_hash;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Longest plaintext accepted by the hasher, in bytes.
pub const MAX_PASSWORD_BYTES: usize = 4096;

/// Password hashing implementation.
///
/// Argon2id with a random salt per hash. The cost factor is the Argon2
/// iteration count; memory and parallelism keep the Argon2 defaults.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a password hasher with the default cost.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Create a password hasher with an explicit cost factor.
    ///
    /// # Arguments
    /// * `cost` - Argon2 iteration count (`t_cost`)
    ///
    /// # Errors
    /// * `InvalidCost` - Cost is outside the range Argon2 accepts
    pub fn with_cost(cost: u32) -> Result<Self, PasswordError> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| PasswordError::InvalidCost(format!("{} (got {})", e, cost)))?;

        Ok(Self { params })
    }

    /// Configured iteration count.
    pub fn cost(&self) -> u32 {
        self.params.t_cost()
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `TooLong` - Password exceeds `MAX_PASSWORD_BYTES`
    /// * `HashingFailed` - Argon2 rejected the input
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual: password.len(),
            });
        }

        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`, never an error. The parameters encoded in
    /// the stored hash are used, so hashes made under an older cost still verify.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a usable Argon2 PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        // Without these, argon2 reports a plain mismatch.
        if parsed_hash.salt.is_none() || parsed_hash.hash.is_none() {
            return Err(PasswordError::VerificationFailed(
                "Invalid password hash: missing salt or hash output".to_string(),
            ));
        }

        match self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(format!(
                "Invalid password hash: {}",
                e
            ))),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
