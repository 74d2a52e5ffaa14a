//! Privilege-gated extractors.
//!
//! Each extractor wraps the previous one, so the checks chain:
//! [`RequireActive`] -> [`RequireStaff`] -> [`RequireAdmin`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pressroom_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an access token whose account was active when it was minted.
/// Rejects with 401 otherwise.
///
/// ```ignore
/// async fn me(RequireActive(user): RequireActive) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireActive(pub AuthUser);

impl FromRequestParts<AppState> for RequireActive {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_active {
            return Err(AppError::Core(CoreError::Unauthorized("Inactive user".into())));
        }
        Ok(RequireActive(user))
    }
}

/// Requires an active staff account. Rejects with 403 Forbidden otherwise.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireActive(user) = RequireActive::from_request_parts(parts, state).await?;
        if !user.is_staff {
            return Err(AppError::Core(CoreError::Forbidden(
                "Staff privileges required".into(),
            )));
        }
        Ok(RequireStaff(user))
    }
}

/// Requires an active staff account with admin privileges.
/// Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireStaff(user) = RequireStaff::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin privileges required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
