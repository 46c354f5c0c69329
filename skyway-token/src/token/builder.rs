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

//! Claim builders for both token kinds.

use chrono::Utc;
use skyway_token_types::{AdminClaims, ScopedClaims};
use tracing::debug;
use uuid::Uuid;

use super::template::{materialize, split_override};
use super::TokenError;

/// Materialize `template` and stamp the identity and lifetime fields.
///
/// `jti`, `iat`, `exp` and `scope.app.id` are overwritten unconditionally so a
/// template cannot forge identity or extend lifetime.
pub fn build_scoped_claims(
    template: &str,
    overrides: &[String],
    app_id: &str,
    expire_secs: i64,
) -> Result<ScopedClaims, TokenError> {
    build_scoped_claims_at(template, overrides, app_id, expire_secs, Utc::now().timestamp())
}

/// [`build_scoped_claims`] with an explicit clock reading.
pub fn build_scoped_claims_at(
    template: &str,
    overrides: &[String],
    app_id: &str,
    expire_secs: i64,
    now: i64,
) -> Result<ScopedClaims, TokenError> {
    let mut claims = materialize(template, overrides)?;

    claims.jti = Uuid::new_v4().to_string();
    claims.iat = now;
    claims.exp = expiry(now, expire_secs)?;
    claims.scope.app.id = app_id.to_string();

    Ok(claims)
}

/// Build admin claims from defaults, then apply `overrides`.
///
/// Recognised keys are `jti`, `iat`, `exp` and `appId`. Unknown keys and
/// entries that are not a single `key=value` pair are skipped.
pub fn build_admin_claims(
    app_id: &str,
    expire_secs: i64,
    overrides: &[String],
) -> Result<AdminClaims, TokenError> {
    build_admin_claims_at(app_id, expire_secs, overrides, Utc::now().timestamp())
}

/// [`build_admin_claims`] with an explicit clock reading.
pub fn build_admin_claims_at(
    app_id: &str,
    expire_secs: i64,
    overrides: &[String],
    now: i64,
) -> Result<AdminClaims, TokenError> {
    let mut claims = AdminClaims {
        jti: Uuid::new_v4().to_string(),
        iat: now,
        exp: expiry(now, expire_secs)?,
        app_id: app_id.to_string(),
    };

    for entry in overrides {
        let Some((key, value)) = split_override(entry) else {
            debug!(entry = entry.as_str(), "Skipping malformed override");
            continue;
        };
        match key {
            "jti" => claims.jti = value.to_string(),
            "iat" => claims.iat = parse_timestamp("iat", value)?,
            "exp" => claims.exp = parse_timestamp("exp", value)?,
            "appId" => claims.app_id = value.to_string(),
            _ => {
                debug!(key, "Ignoring unknown override");
                continue;
            }
        }
        debug!(key, value, "Set value");
    }

    Ok(claims)
}

fn expiry(now: i64, expire_secs: i64) -> Result<i64, TokenError> {
    now.checked_add(expire_secs)
        .ok_or(TokenError::Lifetime { expire_secs })
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<i64, TokenError> {
    value.parse::<i64>().map_err(|_| TokenError::Override {
        field,
        value: value.to_string(),
    })
}
