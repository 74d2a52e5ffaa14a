//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router is
//! involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use pressroom_api::auth::error::TokenError;
use pressroom_api::error::AppError;
use pressroom_core::error::CoreError;

/// Convert an `AppError` into its status code, `WWW-Authenticate` value and
/// parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, Option<String>, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let challenge = response
        .headers()
        .get("www-authenticate")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, challenge, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "User",
        id: "abc".into(),
    });

    let (status, challenge, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(challenge.is_none());
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "User with id abc not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Invalid email address".into()));

    let (status, _, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unauthorized_carries_bearer_challenge() {
    let err = AppError::Core(CoreError::Unauthorized("Invalid access token".into()));

    let (status, challenge, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(challenge.as_deref(), Some("Bearer"));
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid access token");
}

#[tokio::test]
async fn expired_token_is_distinguishable_from_invalid() {
    let err = AppError::Core(TokenError::Expired.into_core("access token"));

    let (status, challenge, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(challenge.as_deref(), Some("Bearer"));
    assert_eq!(json["code"], "TOKEN_EXPIRED");
    assert_eq!(json["error"], "Access token has expired");
}

#[tokio::test]
async fn invalid_token_detail_is_not_leaked() {
    let err = AppError::Core(
        TokenError::Invalid("InvalidSignature".into()).into_core("refresh token"),
    );

    let (status, _, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Invalid refresh token");
}

#[tokio::test]
async fn forbidden_returns_403_without_challenge() {
    let err = AppError::Core(CoreError::Forbidden("Admin privileges required".into()));

    let (status, challenge, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(challenge.is_none());
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("Email already registered".into()));

    let (status, _, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("signing key rejected by backend".into());

    let (status, _, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn core_internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::Core(TokenError::Encoding("bad key".into()).into_core("access token"));

    let (status, _, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}
