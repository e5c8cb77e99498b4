use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher as _, PasswordVerifier,
        SaltString, rand_core::OsRng,
    },
};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum PasswordError {
    #[error("invalid hashing parameters: {0}")]
    Params(argon2::Error),

    #[error("password hashing failed: {0}")]
    Hash(PasswordHashError),
}

/// Salted Argon2id digests with configurable cost.
///
/// Salts come from the OS RNG and are 16 bytes long.
#[derive(Debug, Clone)]
pub(crate) struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub(crate) fn new(memory_kib: u32, iterations: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, 1, None).map_err(PasswordError::Params)?;
        Ok(Self { params })
    }

    pub(crate) fn hash(&self, raw_password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2()
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(PasswordError::Hash)?;
        Ok(digest.to_string())
    }

    /// `Ok(false)` on mismatch; `Err` only for a digest that cannot be parsed.
    pub(crate) fn verify(&self, digest: &str, raw_password: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(digest).map_err(PasswordError::Hash)?;
        // digests carry their own params, so older cost settings still verify
        match self.argon2().verify_password(raw_password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(err) => Err(PasswordError::Hash(err)),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}
