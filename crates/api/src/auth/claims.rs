//! Claims carried inside signed credentials, one variant per token kind.
//!
//! Only access tokens embed the denormalized user fields. Refresh and
//! verification tokens carry nothing beyond the subject and the timing
//! claims, so a leaked one reveals no privilege flags.

use std::fmt;
use std::str::FromStr;

use pressroom_core::types::UserId;
use serde::{Deserialize, Serialize};

use super::error::TokenError;

/// Purpose tag of a credential. A closed set: unknown names are rejected
/// when parsed rather than passed through as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
    Verification,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
            TokenKind::Verification => "verification",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access" => Ok(TokenKind::Access),
            "refresh" => Ok(TokenKind::Refresh),
            "verification" => Ok(TokenKind::Verification),
            other => Err(TokenError::UnknownKind(other.to_string())),
        }
    }
}

/// Caller-supplied input for minting. `subject` is always used; the
/// remaining fields only reach access tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimsInput {
    pub subject: UserId,
    pub email: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_staff: bool,
    pub is_admin: bool,
}

impl ClaimsInput {
    /// Input carrying only a subject, for refresh and verification tokens.
    pub fn subject_only(subject: impl Into<UserId>) -> Self {
        Self {
            subject: subject.into(),
            ..Self::default()
        }
    }
}

/// Payload of an `access` token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: UserId,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_admin: bool,
}

/// Payload of a `refresh` token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: UserId,
    pub iat: i64,
    pub exp: i64,
}

/// Payload of an email `verification` token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationClaims {
    pub sub: UserId,
    pub iat: i64,
    pub exp: i64,
}

/// Decoded credential payload, tagged on the `kind` JSON key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TokenClaims {
    Access(AccessClaims),
    Refresh(RefreshClaims),
    Verification(VerificationClaims),
}

impl TokenClaims {
    /// Build the payload for `kind`, dropping any input field that kind
    /// must not carry.
    pub fn new(input: &ClaimsInput, kind: TokenKind, iat: i64, exp: i64) -> Self {
        let sub = input.subject.clone();
        match kind {
            TokenKind::Access => TokenClaims::Access(AccessClaims {
                sub,
                iat,
                exp,
                email: input.email.clone(),
                is_active: input.is_active,
                is_verified: input.is_verified,
                is_staff: input.is_staff,
                is_admin: input.is_admin,
            }),
            TokenKind::Refresh => TokenClaims::Refresh(RefreshClaims { sub, iat, exp }),
            TokenKind::Verification => {
                TokenClaims::Verification(VerificationClaims { sub, iat, exp })
            }
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            TokenClaims::Access(_) => TokenKind::Access,
            TokenClaims::Refresh(_) => TokenKind::Refresh,
            TokenClaims::Verification(_) => TokenKind::Verification,
        }
    }

    pub fn subject(&self) -> &str {
        match self {
            TokenClaims::Access(c) => &c.sub,
            TokenClaims::Refresh(c) => &c.sub,
            TokenClaims::Verification(c) => &c.sub,
        }
    }

    pub fn issued_at(&self) -> i64 {
        match self {
            TokenClaims::Access(c) => c.iat,
            TokenClaims::Refresh(c) => c.iat,
            TokenClaims::Verification(c) => c.iat,
        }
    }

    pub fn expires_at(&self) -> i64 {
        match self {
            TokenClaims::Access(c) => c.exp,
            TokenClaims::Refresh(c) => c.exp,
            TokenClaims::Verification(c) => c.exp,
        }
    }

    pub fn into_access(self) -> Option<AccessClaims> {
        match self {
            TokenClaims::Access(c) => Some(c),
            _ => None,
        }
    }
}
