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

//! Inspection-only token decoding.
//!
//! The signature is **not** checked. A token with a bad signature decodes
//! exactly like a valid one. Never treat a decoded result as authorized; use
//! [`super::verify_token`] for that.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::de::DeserializeOwned;
use skyway_token_types::{AdminClaims, ScopedClaims};

use super::TokenError;

/// Decode a scoped SkyWay Auth Token without verifying it.
pub fn decode_token(token: &str) -> Result<ScopedClaims, TokenError> {
    decode_unverified(token)
}

/// Decode a SkyWay Admin Auth Token without verifying it.
pub fn decode_admin_token(token: &str) -> Result<AdminClaims, TokenError> {
    decode_unverified(token)
}

fn decode_unverified<T: DeserializeOwned>(token: &str) -> Result<T, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<T>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| TokenError::Decode(e.to_string()))
}
