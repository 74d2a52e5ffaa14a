//! Request handlers.
//!
//! Handlers stay thin: they extract input, delegate to
//! [`AuthService`](crate::auth::service::AuthService) and map errors via
//! [`AppError`](crate::error::AppError).

pub mod auth;
pub mod users;
