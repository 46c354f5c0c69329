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

//! Shared test helpers for skyway-token integration tests.

#![allow(dead_code)]

use axum::response::Response;
use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use skyway_token::{routes, state::AppState, TokenConfig};

pub const APP_ID: &str = "402e60fb-9698-4eb9-9ee2-6d3d66a78068";
pub const SECRET_KEY: &str = "5ecccc3b-5577-4747-b04e-df3194f54b63";
pub const JTI: &str = "0d8b8b3e-5f0e-4c7a-9d2b-3a0a5c6f1e42";

/// Fixed verifier clock used by the `verify_token_at` tests.
pub const NOW: i64 = 1_700_000_000;

pub const TEMPLATE: &str = r#"{
  "version": 2,
  "scope": {
    "app": {
      "turn": true,
      "actions": ["read"],
      "channels": [
        {
          "name": "*",
          "actions": ["write"],
          "members": [
            {
              "name": "*",
              "actions": ["write"],
              "publication": { "actions": ["write"] },
              "subscription": { "actions": ["write"] }
            }
          ],
          "sfuBots": [
            {
              "actions": ["write"],
              "forwardings": [{ "actions": ["write"] }]
            }
          ]
        }
      ]
    }
  }
}"#;

pub fn test_config(template: &str) -> TokenConfig {
    TokenConfig {
        app_id: APP_ID.to_string(),
        secret_key: SECRET_KEY.to_string(),
        expire_secs: 3600,
        template: template.to_string(),
    }
}

/// Claims that pass every check at [`NOW`].
pub fn valid_claims() -> Value {
    json!({
        "jti": JTI,
        "iat": NOW,
        "exp": NOW + 60,
        "version": 2,
        "scope": { "app": { "id": APP_ID } }
    })
}

/// [`valid_claims`] with `key` replaced, or removed when `value` is `None`.
pub fn claims_with(key: &str, value: Option<Value>) -> Value {
    let mut claims = valid_claims();
    let object = claims.as_object_mut().expect("claims are an object");
    match value {
        Some(value) => object.insert(key.to_string(), value),
        None => object.remove(key),
    };
    claims
}

/// Sign arbitrary JSON claims with HS256.
pub fn sign_json(claims: &Value, secret_key: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret_key.as_bytes()),
    )
    .expect("signing test claims should not fail")
}

/// Build a correctly signed HS256 token around a raw, possibly non-JSON payload.
pub fn sign_raw_payload(payload: &str, secret_key: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(payload);
    let message = format!("{header}.{payload}");
    let signature = jsonwebtoken::crypto::sign(
        message.as_bytes(),
        &EncodingKey::from_secret(secret_key.as_bytes()),
        Algorithm::HS256,
    )
    .expect("signing test payload should not fail");
    format!("{message}.{signature}")
}

/// Build the Axum router with the given template, ready for `tower::ServiceExt::oneshot`.
pub fn build_app(template: &str) -> Router {
    routes::router().with_state(AppState::new(test_config(template)))
}

/// Consume a response body and deserialize JSON into `T`.
pub async fn response_json<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = response_bytes(resp).await;
    serde_json::from_slice(&bytes).expect("deserialize response body")
}

pub async fn response_text(resp: Response) -> String {
    let bytes = response_bytes(resp).await;
    String::from_utf8(bytes).expect("response body is UTF-8")
}

async fn response_bytes(resp: Response) -> Vec<u8> {
    resp.into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes()
        .to_vec()
}
