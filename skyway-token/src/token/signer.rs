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

//! HS256 token signing.

use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

use super::TokenError;

/// Serialize `claims` and sign them with `secret_key` (raw bytes, HMAC-SHA256).
///
/// The header is always `{"typ":"JWT","alg":"HS256"}`.
pub fn sign<T: Serialize>(claims: &T, secret_key: &str) -> Result<String, TokenError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret_key.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("Failed to sign JWT: {e}");
        TokenError::Signing(e.to_string())
    })
}
