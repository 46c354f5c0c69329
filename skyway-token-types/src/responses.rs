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

//! Response types for the token server.
//!
//! JSON endpoints return an [`APIResponse<T>`] envelope:
//! - On success: `{ "success": true,  "result": <T> }`
//! - On failure: `{ "success": false, "result": <APIError> }`

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Generic envelope
// ---------------------------------------------------------------------------

/// Top-level API response envelope.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct APIResponse<A: Serialize> {
    pub success: bool,
    pub result: A,
}

impl<A: Serialize> APIResponse<A> {
    /// Wrap a successful result.
    pub fn ok(result: A) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

impl APIResponse<crate::error::APIError> {
    /// Wrap an error result.
    pub fn error(err: crate::error::APIError) -> Self {
        Self {
            success: false,
            result: err,
        }
    }
}

// ---------------------------------------------------------------------------
// Endpoint-specific response payloads
// ---------------------------------------------------------------------------

/// Response payload for `POST /verify`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct VerifyTokenResponse {
    /// `"admin"` or `"scoped"`.
    pub kind: String,
}
