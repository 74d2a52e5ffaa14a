//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use pressroom_core::error::CoreError;
use pressroom_core::types::UserId;

use crate::auth::claims::{AccessClaims, TokenKind};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller extracted from an access token in the
/// `Authorization: Bearer <token>` header.
///
/// The flags are the snapshot taken when the token was minted.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_staff: bool,
    pub is_admin: bool,
}

impl From<AccessClaims> for AuthUser {
    fn from(claims: AccessClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            is_active: claims.is_active,
            is_verified: claims.is_verified,
            is_staff: claims.is_staff,
            is_admin: claims.is_admin,
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = state
            .tokens
            .decode_kind(token.trim(), TokenKind::Access)
            .map_err(|e| AppError::Core(e.into_core("access token")))?;

        claims
            .into_access()
            .map(AuthUser::from)
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid access token".into())))
    }
}
