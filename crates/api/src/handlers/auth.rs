//! Handlers for the `/auth` resource (register, login, refresh, email verification).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::TokenPair;
use crate::error::AppResult;
use crate::extract::{AppForm, AppJson, AppQuery};
use crate::middleware::rbac::RequireActive;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::users::models::UserResponse;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register` and `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Form body for `POST /auth/token` (OAuth2 password grant). `username`
/// carries the email address.
#[derive(Debug, Deserialize)]
pub struct PasswordGrantForm {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Query string for `GET /auth/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    pub token: String,
}

/// Successful authentication response returned by login, token and refresh.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub user: UserResponse,
    /// Email delivery is out of scope; the token is returned for the client
    /// to relay.
    pub verification_token: String,
}

#[derive(Debug, Serialize)]
pub struct VerificationTokenResponse {
    pub verification_token: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyEmailResponse {
    pub message: &'static str,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account and return it with a verification token (201 Created).
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RegistrationResponse>>)> {
    let registration = state.auth.register(&input.email, &input.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RegistrationResponse {
                user: UserResponse::from(&registration.user),
                verification_token: registration.verification_token,
            },
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with a JSON email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<CredentialsRequest>,
) -> AppResult<Json<TokenResponse>> {
    let pair = state.auth.login(&input.email, &input.password).await?;
    Ok(Json(token_response(&state, pair)))
}

/// POST /api/v1/auth/token
///
/// OAuth2 password grant over `application/x-www-form-urlencoded`.
pub async fn token(
    State(state): State<AppState>,
    AppForm(input): AppForm<PasswordGrantForm>,
) -> AppResult<Json<TokenResponse>> {
    let pair = state.auth.login(&input.username, &input.password).await?;
    Ok(Json(token_response(&state, pair)))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for a new access + refresh pair.
pub async fn refresh(
    State(state): State<AppState>,
    AppJson(input): AppJson<RefreshRequest>,
) -> AppResult<Json<TokenResponse>> {
    let pair = state.auth.refresh(&input.refresh_token).await?;
    Ok(Json(token_response(&state, pair)))
}

/// GET /api/v1/auth/verify?token=...
///
/// Mark the token's subject as having a verified email address.
pub async fn verify_email(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<VerifyQuery>,
) -> AppResult<Json<DataResponse<VerifyEmailResponse>>> {
    let user = state.auth.verify_email(&query.token).await?;

    Ok(Json(DataResponse {
        data: VerifyEmailResponse {
            message: "Email verified successfully",
            user: UserResponse::from(&user),
        },
    }))
}

/// POST /api/v1/auth/verify/resend
///
/// Issue a fresh verification token for the authenticated account.
pub async fn resend_verification(
    State(state): State<AppState>,
    RequireActive(user): RequireActive,
) -> AppResult<Json<DataResponse<VerificationTokenResponse>>> {
    let verification_token = state.auth.issue_verification_token(&user.user_id).await?;

    Ok(Json(DataResponse {
        data: VerificationTokenResponse { verification_token },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn token_response(state: &AppState, pair: TokenPair) -> TokenResponse {
    TokenResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: pair.token_type,
        expires_in: state.tokens.access_ttl_secs(),
    }
}
