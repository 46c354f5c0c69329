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

//! SkyWay Auth Token verification.
//!
//! Verification runs against the raw JSON object of the payload rather than
//! the typed claim model, so tokens with wrongly typed or missing fields are
//! rejected instead of being coerced to defaults.
//!
//! Checks, in order (the first failure is returned):
//! 1. HMAC-SHA256 signature, then `exp` not in the past and `nbf` not in the future
//! 2. `jti` is a UUID v4
//! 3. `iat` is a 10-digit timestamp, at most 120 s ahead of now
//! 4. `exp` is a 10-digit timestamp, at most 72 h after `iat`
//! 5. `version` is absent, 0, 1 or 2
//! 6. `scope.app.id` is a UUID v4 (or, for admin tokens, `appId` is)
//! 7. the token string is at most 7168 bytes

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::TokenKind;

/// `iat` may be at most this many seconds ahead of the verifier's clock.
pub const MAX_IAT_SKEW_SECS: i64 = 2 * 60;

/// `exp` may be at most this many seconds after `iat`.
pub const MAX_LIFETIME_SECS: i64 = 72 * 60 * 60;

/// Upper bound on the serialized token length in bytes.
pub const MAX_TOKEN_BYTES: usize = 7 * 1024;

/// Seconds-precision Unix timestamps are rendered with exactly this many characters.
const TIMESTAMP_DIGITS: usize = 10;

/// The single reason a token was rejected.
///
/// Messages name the violated rule and at most the offending value of that
/// field. They never include the secret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("token is expired. exp: {exp}")]
    Expired { exp: i64 },

    #[error("token is not valid yet. nbf: {nbf}")]
    NotYetValid { nbf: i64 },

    #[error("jti is required")]
    JtiMissing,

    #[error("jti should be UUID v4. value: {value}")]
    JtiInvalid { value: String },

    #[error("iat is required")]
    IatMissing,

    #[error("iat should be seconds unix timestamp. value: {value}")]
    IatNotSeconds { value: String },

    #[error("iat should be less than 2 minutes from now. value: {iat}")]
    IatInFuture { iat: i64 },

    #[error("exp is required")]
    ExpMissing,

    #[error("exp should be seconds unix timestamp. value: {value}")]
    ExpNotSeconds { value: String },

    #[error("exp should be less than 72 hours from iat. iat: {iat} exp: {exp}")]
    ExpTooLong { iat: i64, exp: i64 },

    #[error("version should be undefined, 0, 1 or 2. value: {value}")]
    VersionInvalid { value: String },

    #[error("scope is required")]
    ScopeMissing,

    #[error("scope should be object")]
    ScopeNotObject,

    #[error("scope.app is required")]
    AppMissing,

    #[error("scope.app should be object")]
    AppNotObject,

    #[error("{field} is required")]
    AppIdMissing { field: &'static str },

    #[error("{field} should be UUID v4. value: {value}")]
    AppIdInvalid { field: &'static str, value: String },

    #[error("token size should be less than 7KB. size: {size}")]
    TooLarge { size: usize },
}

impl ValidationError {
    /// Stable, machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::SignatureInvalid => "SIGNATURE_INVALID",
            ValidationError::Malformed(_) => "MALFORMED",
            ValidationError::Expired { .. } => "EXPIRED",
            ValidationError::NotYetValid { .. } => "NOT_YET_VALID",
            ValidationError::JtiMissing => "JTI_MISSING",
            ValidationError::JtiInvalid { .. } => "JTI_INVALID",
            ValidationError::IatMissing => "IAT_MISSING",
            ValidationError::IatNotSeconds { .. } => "IAT_NOT_SECONDS",
            ValidationError::IatInFuture { .. } => "IAT_IN_FUTURE",
            ValidationError::ExpMissing => "EXP_MISSING",
            ValidationError::ExpNotSeconds { .. } => "EXP_NOT_SECONDS",
            ValidationError::ExpTooLong { .. } => "EXP_TOO_LONG",
            ValidationError::VersionInvalid { .. } => "VERSION_INVALID",
            ValidationError::ScopeMissing => "SCOPE_MISSING",
            ValidationError::ScopeNotObject => "SCOPE_NOT_OBJECT",
            ValidationError::AppMissing => "APP_MISSING",
            ValidationError::AppNotObject => "APP_NOT_OBJECT",
            ValidationError::AppIdMissing { .. } => "APP_ID_MISSING",
            ValidationError::AppIdInvalid { .. } => "APP_ID_INVALID",
            ValidationError::TooLarge { .. } => "TOO_LARGE",
        }
    }
}

/// Verify `token` against `secret_key` using the current time.
pub fn verify_token(token: &str, secret_key: &str) -> Result<TokenKind, ValidationError> {
    verify_token_at(token, secret_key, Utc::now().timestamp())
}

/// Verify `token` against `secret_key` as of `now` (Unix seconds).
///
/// Pure function of its inputs; the same `now` is used for every check.
pub fn verify_token_at(
    token: &str,
    secret_key: &str,
    now: i64,
) -> Result<TokenKind, ValidationError> {
    let result = run_checks(token, secret_key, now);
    if let Err(reason) = &result {
        debug!(code = reason.code(), "Token rejected: {reason}");
    }
    result
}

fn run_checks(token: &str, secret_key: &str, now: i64) -> Result<TokenKind, ValidationError> {
    let claims = decode_verified(token, secret_key)?;
    check_not_expired(&claims, now)?;
    check_not_before(&claims, now)?;

    check_jti(&claims)?;
    let iat = check_iat(&claims, now)?;
    check_exp(&claims, iat)?;
    check_version(&claims)?;
    let kind = check_scope(&claims)?;

    if token.len() > MAX_TOKEN_BYTES {
        return Err(ValidationError::TooLarge { size: token.len() });
    }

    Ok(kind)
}

/// Check the HS256 signature and return the payload as a raw JSON object.
fn decode_verified(token: &str, secret_key: &str) -> Result<Map<String, Value>, ValidationError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<Map<String, Value>>(
        token,
        &DecodingKey::from_secret(secret_key.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => ValidationError::SignatureInvalid,
        _ => ValidationError::Malformed(e.to_string()),
    })
}

/// A present, numeric `exp` must not lie in the past.
fn check_not_expired(claims: &Map<String, Value>, now: i64) -> Result<(), ValidationError> {
    match claim(claims, "exp").and_then(as_integer) {
        Some(exp) if exp < now => Err(ValidationError::Expired { exp }),
        _ => Ok(()),
    }
}

/// A present, numeric `nbf` must not lie in the future.
fn check_not_before(claims: &Map<String, Value>, now: i64) -> Result<(), ValidationError> {
    match claim(claims, "nbf").and_then(as_integer) {
        Some(nbf) if nbf > now => Err(ValidationError::NotYetValid { nbf }),
        _ => Ok(()),
    }
}

fn check_jti(claims: &Map<String, Value>) -> Result<(), ValidationError> {
    let jti = match claim(claims, "jti") {
        None => return Err(ValidationError::JtiMissing),
        Some(Value::String(s)) if s.is_empty() => return Err(ValidationError::JtiMissing),
        Some(Value::String(s)) => s.as_str(),
        Some(other) => {
            return Err(ValidationError::JtiInvalid {
                value: other.to_string(),
            })
        }
    };

    if is_uuid_v4(jti) {
        Ok(())
    } else {
        Err(ValidationError::JtiInvalid {
            value: jti.to_string(),
        })
    }
}

fn check_iat(claims: &Map<String, Value>, now: i64) -> Result<i64, ValidationError> {
    let iat = match timestamp_claim(claims, "iat") {
        Timestamp::Missing => return Err(ValidationError::IatMissing),
        Timestamp::NotNumber(value) => return Err(ValidationError::IatNotSeconds { value }),
        Timestamp::Value(iat) => iat,
    };

    if !has_seconds_digits(iat) {
        return Err(ValidationError::IatNotSeconds {
            value: iat.to_string(),
        });
    }
    if iat > now + MAX_IAT_SKEW_SECS {
        return Err(ValidationError::IatInFuture { iat });
    }
    Ok(iat)
}

fn check_exp(claims: &Map<String, Value>, iat: i64) -> Result<(), ValidationError> {
    let exp = match timestamp_claim(claims, "exp") {
        Timestamp::Missing => return Err(ValidationError::ExpMissing),
        Timestamp::NotNumber(value) => return Err(ValidationError::ExpNotSeconds { value }),
        Timestamp::Value(exp) => exp,
    };

    if !has_seconds_digits(exp) {
        return Err(ValidationError::ExpNotSeconds {
            value: exp.to_string(),
        });
    }
    if exp > iat + MAX_LIFETIME_SECS {
        return Err(ValidationError::ExpTooLong { iat, exp });
    }
    Ok(())
}

fn check_version(claims: &Map<String, Value>) -> Result<(), ValidationError> {
    let Some(value) = claim(claims, "version") else {
        return Ok(());
    };
    match as_integer(value) {
        Some(0..=2) => Ok(()),
        _ => Err(ValidationError::VersionInvalid {
            value: value.to_string(),
        }),
    }
}

fn check_scope(claims: &Map<String, Value>) -> Result<TokenKind, ValidationError> {
    let scope = match claim(claims, "scope") {
        Some(scope) => scope,
        None if claims.contains_key("appId") => {
            check_app_id(claims.get("appId"), "appId")?;
            return Ok(TokenKind::Admin);
        }
        None => return Err(ValidationError::ScopeMissing),
    };

    let scope = scope.as_object().ok_or(ValidationError::ScopeNotObject)?;
    let app = scope.get("app").ok_or(ValidationError::AppMissing)?;
    let app = app.as_object().ok_or(ValidationError::AppNotObject)?;
    check_app_id(app.get("id"), "scope.app.id")?;

    Ok(TokenKind::Scoped)
}

fn check_app_id(value: Option<&Value>, field: &'static str) -> Result<(), ValidationError> {
    match value {
        None => Err(ValidationError::AppIdMissing { field }),
        Some(Value::String(id)) if is_uuid_v4(id) => Ok(()),
        Some(Value::String(id)) => Err(ValidationError::AppIdInvalid {
            field,
            value: id.clone(),
        }),
        Some(other) => Err(ValidationError::AppIdInvalid {
            field,
            value: other.to_string(),
        }),
    }
}

enum Timestamp {
    Missing,
    NotNumber(String),
    Value(i64),
}

/// Read a timestamp claim. Absent, `null` and `0` all count as missing.
fn timestamp_claim(claims: &Map<String, Value>, name: &str) -> Timestamp {
    match claim(claims, name) {
        None => Timestamp::Missing,
        Some(value) => match as_integer(value) {
            Some(0) => Timestamp::Missing,
            Some(n) => Timestamp::Value(n),
            None => Timestamp::NotNumber(value.to_string()),
        },
    }
}

/// Top-level claim lookup; `null` is treated as absent.
fn claim<'a>(claims: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    claims.get(name).filter(|value| !value.is_null())
}

/// JSON numbers truncated toward zero; non-numbers yield `None`.
fn as_integer(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
}

/// Length of the decimal rendering, sign included, must be exactly 10.
fn has_seconds_digits(timestamp: i64) -> bool {
    timestamp.to_string().len() == TIMESTAMP_DIGITS
}

fn is_uuid_v4(value: &str) -> bool {
    Uuid::parse_str(value)
        .map(|uuid| uuid.get_version_num() == 4)
        .unwrap_or(false)
}
