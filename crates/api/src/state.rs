use std::sync::Arc;

use crate::auth::jwt::TokenService;
use crate::auth::password::PasswordHasher;
use crate::auth::service::AuthService;
use crate::config::ServerConfig;
use crate::users::store::UserStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Credential minting/validation, used directly by the auth extractors.
    pub tokens: Arc<TokenService>,
    /// Login, refresh, registration and verification flows.
    pub auth: AuthService,
}

impl AppState {
    /// Wire the token service and auth service from `config` over `users`.
    pub fn new(config: ServerConfig, users: Arc<dyn UserStore>, hasher: PasswordHasher) -> Self {
        let tokens = Arc::new(TokenService::new(config.jwt.clone()));
        let auth = AuthService::new(users, hasher, Arc::clone(&tokens));
        Self {
            config: Arc::new(config),
            tokens,
            auth,
        }
    }
}
