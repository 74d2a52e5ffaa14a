//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register        -> register
/// POST /login           -> login (JSON)
/// POST /token           -> OAuth2 password grant (form)
/// POST /refresh         -> refresh
/// GET  /verify          -> verify_email (?token=)
/// POST /verify/resend   -> resend_verification (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/token", post(auth::token))
        .route("/refresh", post(auth::refresh))
        .route("/verify", get(auth::verify_email))
        .route("/verify/resend", post(auth::resend_verification))
}
