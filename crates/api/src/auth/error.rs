//! Typed failures raised by the token service and the password hasher.

use pressroom_core::error::CoreError;

/// Failures from minting or decoding a credential.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The signature checked out but the validity window has elapsed.
    /// Recoverable: the holder should refresh or log in again.
    #[error("Token has expired")]
    Expired,

    /// Bad signature, malformed structure, missing claims, algorithm mismatch
    /// or an unexpected kind. Never recoverable.
    #[error("Invalid token: {0}")]
    Invalid(String),

    /// A kind name outside the closed `access | refresh | verification` set.
    #[error("Unknown token kind: {0}")]
    UnknownKind(String),

    /// A time-to-live too short to satisfy `exp > iat` at second precision.
    #[error("Token TTL must be at least one second, got {0:?}")]
    InvalidTtl(std::time::Duration),

    /// Signing or serialization failed.
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl TokenError {
    /// Map a failure on a presented credential to a domain error, naming the
    /// credential (e.g. `"refresh token"`) in the message.
    pub fn into_core(self, what: &str) -> CoreError {
        match self {
            TokenError::Expired => {
                CoreError::TokenExpired(format!("{} has expired", capitalize(what)))
            }
            TokenError::Invalid(_) | TokenError::UnknownKind(_) => {
                CoreError::Unauthorized(format!("Invalid {what}"))
            }
            TokenError::InvalidTtl(_) | TokenError::Encoding(_) => {
                CoreError::Internal(self.to_string())
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Failures from hashing or verifying a password.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// The stored digest is not a PHC string for a supported Argon2 variant.
    /// Indicates corruption or configuration drift for that record.
    #[error("Password digest has an unsupported format")]
    InvalidDigestFormat,

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}
