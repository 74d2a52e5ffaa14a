//! Authentication orchestration: look up the account, check the password,
//! mint credentials.
//!
//! Privilege flags inside access tokens are a snapshot. Every refresh
//! re-reads the account so deactivation, deletion or role changes take
//! effect within one access-token lifetime.

use std::sync::Arc;

use pressroom_core::error::CoreError;
use pressroom_core::users::{parse_email, MIN_PASSWORD_LENGTH};

use super::claims::TokenKind;
use super::error::PasswordError;
use super::jwt::{TokenPair, TokenService};
use super::password::{validate_password_strength, PasswordHasher};
use crate::users::models::User;
use crate::users::store::UserStore;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// A freshly registered account and the token that verifies its email.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub verification_token: String,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: PasswordHasher,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Create an active, unverified, unprivileged account.
    pub async fn register(&self, email: &str, password: &str) -> Result<Registration, CoreError> {
        let email = parse_email(email)?;
        validate_password_strength(password, MIN_PASSWORD_LENGTH).map_err(CoreError::Validation)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(CoreError::Conflict(format!(
                "A user with email {email} already exists"
            )));
        }

        let hashed = self.hash_password(password).await?;
        let user = self.users.insert(User::new(email, hashed)).await?;
        let verification_token = self
            .tokens
            .mint_verification(&user.id)
            .map_err(|e| CoreError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(Registration {
            user,
            verification_token,
        })
    }

    /// Check `email` / `password` and return the live account.
    ///
    /// Unknown, soft-deleted and wrong-password attempts are indistinguishable
    /// to the caller.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, CoreError> {
        let Some(user) = self
            .users
            .find_by_email(email)
            .await?
            .filter(|u| !u.is_deleted)
        else {
            tracing::info!("Login rejected: no such account");
            return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        if !self.verify_password(&user, password).await? {
            tracing::info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        if !user.is_active {
            tracing::info!(user_id = %user.id, "Login rejected: inactive account");
            return Err(CoreError::Unauthorized("Inactive user".into()));
        }

        Ok(self.upgrade_digest(user, password).await)
    }

    /// Authenticate and mint an access/refresh pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, CoreError> {
        let user = self.authenticate(email, password).await?;
        let pair = self.mint_pair(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(pair)
    }

    /// Redeem a refresh token for a new pair carrying current account flags.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, CoreError> {
        let claims = self
            .tokens
            .decode_kind(refresh_token, TokenKind::Refresh)
            .map_err(|e| e.into_core("refresh token"))?;

        let user = self
            .users
            .find_by_id(claims.subject())
            .await?
            .filter(|u| !u.is_deleted)
            .ok_or_else(|| CoreError::Unauthorized("Invalid refresh token".into()))?;

        if !user.is_active {
            return Err(CoreError::Unauthorized("Inactive user".into()));
        }

        let pair = self.mint_pair(&user)?;
        tracing::debug!(user_id = %user.id, "Token pair refreshed");
        Ok(pair)
    }

    /// Mark the subject of a verification token as verified. Idempotent.
    pub async fn verify_email(&self, token: &str) -> Result<User, CoreError> {
        let claims = self
            .tokens
            .decode_kind(token, TokenKind::Verification)
            .map_err(|e| e.into_core("verification token"))?;

        let mut user = self.get_user(claims.subject()).await?;
        if user.is_verified {
            return Ok(user);
        }

        user.is_verified = true;
        let user = self.users.update(user).await?;
        tracing::info!(user_id = %user.id, "Email verified");
        Ok(user)
    }

    /// Mint a new verification token for an account that is not yet verified.
    pub async fn issue_verification_token(&self, user_id: &str) -> Result<String, CoreError> {
        let user = self.get_user(user_id).await?;
        if user.is_verified {
            return Err(CoreError::Conflict("Email is already verified".into()));
        }
        self.tokens
            .mint_verification(&user.id)
            .map_err(|e| CoreError::Internal(e.to_string()))
    }

    /// Fetch a live (not soft-deleted) account by id.
    pub async fn get_user(&self, user_id: &str) -> Result<User, CoreError> {
        self.users
            .find_by_id(user_id)
            .await?
            .filter(|u| !u.is_deleted)
            .ok_or_else(|| CoreError::NotFound {
                entity: "User",
                id: user_id.to_string(),
            })
    }

    /// All live accounts, oldest first.
    pub async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        let users = self.users.list().await?;
        Ok(users.into_iter().filter(|u| !u.is_deleted).collect())
    }

    /// Change the caller's own email and/or password. A new email address
    /// must be verified again.
    pub async fn update_profile(
        &self,
        user_id: &str,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, CoreError> {
        let mut user = self.get_user(user_id).await?;

        if let Some(email) = email {
            let email = parse_email(email)?;
            if email != user.email {
                user.email = email;
                user.is_verified = false;
            }
        }

        if let Some(password) = password {
            validate_password_strength(password, MIN_PASSWORD_LENGTH)
                .map_err(CoreError::Validation)?;
            user.hashed_password = self.hash_password(password).await?;
        }

        let user = self.users.update(user).await?;
        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    /// Soft-delete the caller's own account. Staff accounts are refused.
    pub async fn delete_own_account(&self, user_id: &str) -> Result<(), CoreError> {
        let user = self.get_user(user_id).await?;
        if user.is_staff {
            return Err(CoreError::Forbidden(
                "Staff accounts cannot be deleted".into(),
            ));
        }
        self.soft_delete(user).await
    }

    /// Soft-delete any account by id.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), CoreError> {
        let user = self.get_user(user_id).await?;
        self.soft_delete(user).await
    }

    /// Activate or deactivate an account. Outstanding access tokens stay valid
    /// until they expire; refresh is refused from the next attempt.
    pub async fn set_active(&self, user_id: &str, active: bool) -> Result<User, CoreError> {
        let mut user = self.get_user(user_id).await?;
        if user.is_active == active {
            return Ok(user);
        }

        user.is_active = active;
        let user = self.users.update(user).await?;
        tracing::info!(user_id = %user.id, active, "Account activation changed");
        Ok(user)
    }

    /// Create the initial staff + admin account unless the email is already
    /// registered. Returns the existing or newly created account.
    pub async fn bootstrap_admin(&self, email: &str, password: &str) -> Result<User, CoreError> {
        let email = parse_email(email)?;
        if let Some(existing) = self.users.find_by_email(&email).await? {
            tracing::debug!(user_id = %existing.id, "Admin account already present");
            return Ok(existing);
        }

        validate_password_strength(password, MIN_PASSWORD_LENGTH).map_err(CoreError::Validation)?;
        let hashed = self.hash_password(password).await?;

        let mut admin = User::new(email, hashed);
        admin.is_verified = true;
        admin.is_staff = true;
        admin.is_admin = true;

        let admin = self.users.insert(admin).await?;
        tracing::info!(user_id = %admin.id, email = %admin.email, "Admin account created");
        Ok(admin)
    }

    async fn soft_delete(&self, mut user: User) -> Result<(), CoreError> {
        user.is_deleted = true;
        let user = self.users.update(user).await?;
        tracing::info!(user_id = %user.id, "Account deleted");
        Ok(())
    }

    // Re-hash legacy or under-cost digests with the current parameters.
    // The login has already succeeded, so failures here are only logged.
    async fn upgrade_digest(&self, user: User, password: &str) -> User {
        if !self.hasher.needs_rehash(&user.hashed_password) {
            return user;
        }

        let mut upgraded = user.clone();
        match self.hash_password(password).await {
            Ok(digest) => upgraded.hashed_password = digest,
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Password digest upgrade failed");
                return user;
            }
        }

        match self.users.update(upgraded).await {
            Ok(stored) => {
                tracing::info!(user_id = %stored.id, "Password digest upgraded");
                stored
            }
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Password digest upgrade failed");
                user
            }
        }
    }

    fn mint_pair(&self, user: &User) -> Result<TokenPair, CoreError> {
        self.tokens
            .mint_pair(&user.claims_input())
            .map_err(|e| CoreError::Internal(e.to_string()))
    }

    // Argon2id at the pinned cost takes tens of milliseconds; keep it off
    // the async workers.
    async fn hash_password(&self, password: &str) -> Result<String, CoreError> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| CoreError::Internal(format!("Password hashing task failed: {e}")))?
            .map_err(|e| CoreError::Internal(e.to_string()))
    }

    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, CoreError> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let digest = user.hashed_password.clone();

        let result = tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| CoreError::Internal(format!("Password verification task failed: {e}")))?;

        match result {
            Ok(matches) => Ok(matches),
            Err(PasswordError::InvalidDigestFormat) => {
                tracing::error!(user_id = %user.id, "Stored password digest has an unsupported format");
                Err(CoreError::Internal("Stored password digest is unreadable".into()))
            }
            Err(e) => Err(CoreError::Internal(e.to_string())),
        }
    }
}
