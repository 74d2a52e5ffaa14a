//! Authentication primitives and orchestration.
//!
//! - [`jwt`] -- credential minting and validation ([`jwt::TokenService`]).
//! - [`claims`] -- per-kind claim payloads and the [`claims::TokenKind`] tag.
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`error`] -- typed token and digest failures.
//! - [`service`] -- login, refresh, registration and email verification.

pub mod claims;
pub mod error;
pub mod jwt;
pub mod password;
pub mod service;
