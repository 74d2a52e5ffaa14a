//! Handlers for the `/users` and `/admin/users` resources.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pressroom_core::error::CoreError;
use pressroom_core::types::UserId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::rbac::{RequireActive, RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::users::models::UserResponse;

/// Request body for `PATCH /users/me`. Omitted fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// GET /api/v1/users
///
/// All live accounts, oldest first. Staff only.
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = state.auth.list_users().await?;
    Ok(Json(DataResponse {
        data: users.iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/v1/users/me
///
/// The caller's live account record (not the token snapshot).
pub async fn me(
    State(state): State<AppState>,
    RequireActive(user): RequireActive,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let record = state.auth.get_user(&user.user_id).await?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&record),
    }))
}

/// PATCH /api/v1/users/me
///
/// Change the caller's email and/or password.
pub async fn update_me(
    State(state): State<AppState>,
    RequireActive(user): RequireActive,
    AppJson(input): AppJson<UpdateProfileRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let record = state
        .auth
        .update_profile(
            &user.user_id,
            input.email.as_deref(),
            input.password.as_deref(),
        )
        .await?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&record),
    }))
}

/// DELETE /api/v1/users/me
///
/// Soft-delete the caller's account (204 No Content). Staff accounts are refused.
pub async fn delete_me(
    State(state): State<AppState>,
    RequireActive(user): RequireActive,
) -> AppResult<StatusCode> {
    state.auth.delete_own_account(&user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/{id}
///
/// An account by id. Callers may read their own record; staff may read any.
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireActive(user): RequireActive,
    Path(id): Path<UserId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if user.user_id != id && !user.is_staff {
        return Err(CoreError::Forbidden(
            "You do not have permission to access this user".into(),
        )
        .into());
    }

    let record = state.auth.get_user(&id).await?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&record),
    }))
}

/// DELETE /api/v1/users/{id}
///
/// Soft-delete any account (204 No Content). Admin only.
pub async fn delete_by_id(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<UserId>,
) -> AppResult<StatusCode> {
    state.auth.delete_user(&id).await?;
    tracing::info!(admin_id = %admin.user_id, user_id = %id, "User deleted by admin");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<UserId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let record = state.auth.set_active(&id, false).await?;
    tracing::info!(admin_id = %admin.user_id, user_id = %record.id, "User deactivated");
    Ok(Json(DataResponse {
        data: UserResponse::from(&record),
    }))
}

/// POST /api/v1/admin/users/{id}/activate
pub async fn activate(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<UserId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let record = state.auth.set_active(&id, true).await?;
    tracing::info!(admin_id = %admin.user_id, user_id = %record.id, "User activated");
    Ok(Json(DataResponse {
        data: UserResponse::from(&record),
    }))
}
