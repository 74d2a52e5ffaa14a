//! Route definitions for the `/users` and `/admin/users` resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /       -> list (staff)
/// GET    /me     -> me (active account)
/// PATCH  /me     -> update_me (active account)
/// DELETE /me     -> delete_me (active, non-staff account)
/// GET    /{id}   -> get_by_id (self or staff)
/// DELETE /{id}   -> delete_by_id (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route(
            "/me",
            get(users::me)
                .patch(users::update_me)
                .delete(users::delete_me),
        )
        .route("/{id}", get(users::get_by_id).delete(users::delete_by_id))
}

/// Routes mounted at `/admin/users`.
///
/// ```text
/// POST /{id}/deactivate  -> deactivate (admin)
/// POST /{id}/activate    -> activate (admin)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/{id}/deactivate", post(users::deactivate))
        .route("/{id}/activate", post(users::activate))
}
