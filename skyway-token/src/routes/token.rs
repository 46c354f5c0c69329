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

//! Handlers for token issuance and verification.

use axum::{extract::State, Json};
use skyway_token_types::responses::{APIResponse, VerifyTokenResponse};

use crate::error::AppError;
use crate::state::AppState;
use crate::token::{generate_token, verify_token};

/// GET /token
///
/// Returns a freshly signed scoped token as plain text.
pub async fn issue_token(State(state): State<AppState>) -> Result<String, AppError> {
    let token = generate_token(&state.token_config, &[])?;
    Ok(token)
}

/// POST /verify
///
/// The request body is the token string.
pub async fn verify(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<APIResponse<VerifyTokenResponse>>, AppError> {
    let token = body.trim();
    if token.is_empty() {
        return Err(AppError::bad_request("token is required"));
    }

    let kind = verify_token(token, &state.token_config.secret_key)?;
    Ok(Json(APIResponse::ok(VerifyTokenResponse {
        kind: kind.to_string(),
    })))
}
