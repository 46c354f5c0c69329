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

//! API error types.
//!
//! Every failed token server response is returned as `APIResponse<APIError>`
//! with `success: false`.

use serde::{Deserialize, Serialize};

/// Structured error returned in the `result` field of a failed [`super::APIResponse`].
///
/// The `code` field is a machine-readable identifier (e.g. `"JTI_INVALID"`).
/// The `message` field is a human-readable description suitable for display.
/// The `engineering_error` field carries debug-level detail that is useful
/// during development but should be stripped or redacted in production.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct APIError {
    /// Machine-readable error code (e.g. `"TOKEN_ISSUANCE_FAILED"`, `"EXP_TOO_LONG"`).
    pub code: String,

    /// Human-readable error message.
    pub message: String,

    /// Optional engineering-level detail for debugging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engineering_error: Option<String>,
}

impl APIError {
    /// A token was presented but rejected by the verifier.
    ///
    /// `code` is the verifier's reason code, `detail` its message.
    pub fn invalid_token(code: &str, detail: &str) -> Self {
        Self {
            code: code.to_string(),
            message: format!("Invalid token: {detail}"),
            engineering_error: None,
        }
    }

    pub fn bad_request(detail: &str) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: detail.to_string(),
            engineering_error: None,
        }
    }

    pub fn issuance_failed(detail: &str) -> Self {
        Self {
            code: "TOKEN_ISSUANCE_FAILED".to_string(),
            message: "Failed to generate token".to_string(),
            engineering_error: Some(detail.to_string()),
        }
    }
}

impl std::fmt::Display for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for APIError {}
