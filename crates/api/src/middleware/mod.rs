//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from an access-kind Bearer token.
//! - [`rbac::RequireActive`] -- Requires an active account.
//! - [`rbac::RequireStaff`] -- Requires an active staff account.
//! - [`rbac::RequireAdmin`] -- Requires an active staff account with admin rights.

pub mod auth;
pub mod rbac;
