//! Argon2id password hashing, verification, and strength validation.
//!
//! Digests use the PHC string format, so the algorithm, version, cost
//! parameters and salt travel with the hash. Verification always recomputes
//! with the parameters embedded in the digest, never the hasher's current
//! ones, so raising costs later does not lock out existing accounts.
//!
//! Legacy bcrypt digests (`$2a$`, `$2b$`, `$2y$`) still verify. New hashes
//! are always Argon2id, and [`PasswordHasher::needs_rehash`] flags digests
//! that should be upgraded after the next successful login.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use super::error::PasswordError;

/// Memory cost in KiB (64 MiB).
pub const DEFAULT_MEMORY_KIB: u32 = 65_536;
/// Number of passes over memory.
pub const DEFAULT_ITERATIONS: u32 = 2;
/// Degree of parallelism (lanes).
pub const DEFAULT_PARALLELISM: u32 = 4;
/// Raw hash output length in bytes.
pub const HASH_LENGTH: usize = 16;

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

fn is_bcrypt(digest: &str) -> bool {
    BCRYPT_PREFIXES.iter().any(|p| digest.starts_with(p))
}

/// Hashes and verifies passwords with pinned Argon2id cost parameters.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Hasher with the default cost: 64 MiB, 2 iterations, 4 lanes.
    pub fn new() -> Result<Self, PasswordError> {
        Self::with_params(DEFAULT_MEMORY_KIB, DEFAULT_ITERATIONS, DEFAULT_PARALLELISM)
    }

    /// Hasher with explicit cost parameters.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, Some(HASH_LENGTH))
            .map_err(|e| PasswordError::Hashing(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash `password` with a fresh random salt, returning a PHC string.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Verify `password` against a stored Argon2 PHC or bcrypt digest.
    ///
    /// Returns `Ok(false)` on mismatch and
    /// [`PasswordError::InvalidDigestFormat`] when the digest belongs to
    /// neither scheme or is corrupt. The comparison is constant-time.
    pub fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordError> {
        if is_bcrypt(digest) {
            return bcrypt::verify(password, digest)
                .map_err(|_| PasswordError::InvalidDigestFormat);
        }

        let parsed = PasswordHash::new(digest).map_err(|_| PasswordError::InvalidDigestFormat)?;
        Algorithm::try_from(parsed.algorithm).map_err(|_| PasswordError::InvalidDigestFormat)?;

        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(_) => Err(PasswordError::InvalidDigestFormat),
        }
    }

    /// `true` when `digest` was not produced with this hasher's scheme and
    /// cost: bcrypt, another Argon2 variant or version, or different
    /// memory/iteration/lane settings.
    pub fn needs_rehash(&self, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return true;
        };
        if parsed.algorithm != Algorithm::Argon2id.ident()
            || parsed.version != Some(Version::V0x13 as u32)
        {
            return true;
        }
        match Params::try_from(&parsed) {
            Ok(params) => {
                params.m_cost() != self.params.m_cost()
                    || params.t_cost() != self.params.t_cost()
                    || params.p_cost() != self.params.p_cost()
            }
            Err(_) => true,
        }
    }
}

/// Validate that a password meets minimum strength requirements.
///
/// Currently enforces a minimum character length. Returns `Ok(())` when the
/// password is acceptable, or `Err` with a human-readable explanation.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}
