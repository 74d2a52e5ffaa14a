//! User entity model and DTOs.

use pressroom_core::types::{new_user_id, Timestamp, UserId};
use serde::Serialize;

use crate::auth::claims::ClaimsInput;

/// Full user record.
///
/// Contains the password digest -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub hashed_password: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_staff: bool,
    pub is_admin: bool,
    /// Soft-delete flag; deleted accounts cannot authenticate or refresh.
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// A new active, unverified, unprivileged account.
    pub fn new(email: String, hashed_password: String) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: new_user_id(),
            email,
            hashed_password,
            is_active: true,
            is_verified: false,
            is_staff: false,
            is_admin: false,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Claims input carrying the live privilege flags of this account.
    pub fn claims_input(&self) -> ClaimsInput {
        ClaimsInput {
            subject: self.id.clone(),
            email: Some(self.email.clone()),
            is_active: self.is_active,
            is_verified: self.is_verified,
            is_staff: self.is_staff,
            is_admin: self.is_admin,
        }
    }
}

/// Safe user representation for API responses (no password digest).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_staff: bool,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            is_active: user.is_active,
            is_verified: user.is_verified,
            is_staff: user.is_staff,
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
