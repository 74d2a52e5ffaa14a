pub mod auth;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login, JSON (public)
/// /auth/token                          OAuth2 password grant, form (public)
/// /auth/refresh                        refresh (public)
/// /auth/verify                         verify email (public, ?token=)
/// /auth/verify/resend                  new verification token (active)
///
/// /users                              list accounts (staff)
/// /users/me                            own account: read, update, delete (active)
/// /users/{id}                          read (self or staff), delete (admin)
///
/// /admin/users/{id}/deactivate         deactivate account (admin)
/// /admin/users/{id}/activate           reactivate account (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/admin/users", users::admin_router())
}
