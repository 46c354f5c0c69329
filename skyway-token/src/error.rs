/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Application error type that implements Axum's `IntoResponse`.
//!
//! Every error is returned as `APIResponse<APIError>` with `success: false`,
//! paired with the appropriate HTTP status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use skyway_token_types::{APIError, APIResponse};

use crate::token::{TokenError, ValidationError};

/// Application-level error that pairs an HTTP status code with an [`APIError`].
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: APIError,
}

impl AppError {
    pub fn new(status: StatusCode, body: APIError) -> Self {
        Self { status, body }
    }

    pub fn bad_request(detail: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, APIError::bad_request(detail))
    }

    pub fn invalid_token(reason: &ValidationError) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            APIError::invalid_token(reason.code(), &reason.to_string()),
        )
    }

    pub fn issuance_failed(detail: &str) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            APIError::issuance_failed(detail),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = APIResponse::error(self.body);
        (self.status, Json(body)).into_response()
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        tracing::error!("Token issuance failed: {err}");
        Self::issuance_failed(&err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::invalid_token(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;

    /// Consume the response body and deserialize it to `APIResponse<APIError>`.
    async fn read_error_body(resp: Response) -> (StatusCode, APIResponse<APIError>) {
        let status = resp.status();
        let bytes = Body::new(resp.into_body())
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        let parsed: APIResponse<APIError> =
            serde_json::from_slice(&bytes).expect("deserialize error body");
        (status, parsed)
    }

    #[tokio::test]
    async fn validation_error_produces_401_with_reason_code() {
        let err = AppError::from(ValidationError::JtiMissing);
        let (status, body) = read_error_body(err.into_response()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!body.success);
        assert_eq!(body.result.code, "JTI_MISSING");
        assert!(body.result.message.contains("jti is required"));
    }

    #[tokio::test]
    async fn token_error_produces_500() {
        let err = AppError::from(TokenError::Template("invalid value: x".to_string()));
        let (status, body) = read_error_body(err.into_response()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.result.code, "TOKEN_ISSUANCE_FAILED");
        assert_eq!(
            body.result.engineering_error.as_deref(),
            Some("invalid token template: invalid value: x")
        );
    }

    #[tokio::test]
    async fn bad_request_produces_400() {
        let err = AppError::bad_request("token is required");
        let (status, body) = read_error_body(err.into_response()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.result.code, "BAD_REQUEST");
    }
}
