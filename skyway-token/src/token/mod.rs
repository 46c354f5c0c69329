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

//! SkyWay Auth Token engine.
//!
//! Issuance: [`template`] → [`builder`] → [`signer`] → token string.
//! Acceptance: token string + secret → [`verify`] → [`TokenKind`] or a
//! single [`ValidationError`].
//!
//! [`decode`] is an inspection-only side path and must never be used to make
//! an authorization decision.

pub mod builder;
pub mod decode;
pub mod signer;
pub mod template;
pub mod verify;

use std::fmt;

use thiserror::Error;

use crate::config::TokenConfig;

pub use builder::{build_admin_claims, build_scoped_claims};
pub use decode::{decode_admin_token, decode_token};
pub use signer::sign;
pub use template::materialize;
pub use verify::{verify_token, verify_token_at, ValidationError};

/// Errors raised while issuing or decoding a token.
///
/// Issuance errors abort the call; a partially built or unsigned token is
/// never returned.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Malformed override entry, or a template that does not fit the claim model.
    #[error("invalid token template: {0}")]
    Template(String),

    /// A numeric admin override (`iat`, `exp`) is not an integer.
    #[error("failed to convert {field}. {field}: {value}")]
    Override { field: &'static str, value: String },

    /// `iat + expire` does not fit in a Unix timestamp.
    #[error("token lifetime is out of range. expire: {expire_secs}")]
    Lifetime { expire_secs: i64 },

    #[error("failed to generate token: {0}")]
    Signing(String),

    /// The payload could not be parsed into the claim model.
    #[error("failed to decode token: {0}")]
    Decode(String),
}

/// The kind of token accepted by the verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// SkyWay Admin Auth Token (`appId`, no `scope`).
    Admin,
    /// Scoped SkyWay Auth Token.
    Scoped,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Admin => "admin",
            TokenKind::Scoped => "scoped",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build and sign a scoped SkyWay Auth Token from the configured template.
///
/// `jti`, `iat`, `exp` and `scope.app.id` always come from `config` and the
/// clock, never from the template or `overrides`.
pub fn generate_token(config: &TokenConfig, overrides: &[String]) -> Result<String, TokenError> {
    let claims = build_scoped_claims(
        &config.template,
        overrides,
        &config.app_id,
        config.expire_secs,
    )?;
    sign(&claims, &config.secret_key)
}

/// Build and sign a SkyWay Admin Auth Token.
///
/// `overrides` may replace any of `jti`, `iat`, `exp` and `appId`.
pub fn generate_admin_token(
    config: &TokenConfig,
    overrides: &[String],
) -> Result<String, TokenError> {
    let claims = build_admin_claims(&config.app_id, config.expire_secs, overrides)?;
    sign(&claims, &config.secret_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP_ID: &str = "402e60fb-9698-4eb9-9ee2-6d3d66a78068";
    const SECRET_KEY: &str = "5ecccc3b-5577-4747-b04e-df3194f54b63";

    fn test_config(template: &str) -> TokenConfig {
        TokenConfig {
            app_id: APP_ID.to_string(),
            secret_key: SECRET_KEY.to_string(),
            expire_secs: 3600,
            template: template.to_string(),
        }
    }

    #[test]
    fn generated_scoped_token_verifies() {
        let config = test_config(r#"{"version":2,"scope":{"app":{"turn":true}}}"#);
        let token = generate_token(&config, &[]).expect("should sign");
        assert_eq!(verify_token(&token, SECRET_KEY), Ok(TokenKind::Scoped));

        let claims = decode_token(&token).expect("should decode");
        assert_eq!(claims.scope.app.id, APP_ID);
        assert_eq!(claims.version, 2);
        assert!(claims.scope.app.turn);
    }

    #[test]
    fn generated_admin_token_verifies() {
        let config = test_config("");
        let token = generate_admin_token(&config, &[]).expect("should sign");
        assert_eq!(verify_token(&token, SECRET_KEY), Ok(TokenKind::Admin));

        let claims = decode_admin_token(&token).expect("should decode");
        assert_eq!(claims.app_id, APP_ID);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn empty_template_aborts_issuance() {
        let config = test_config("");
        let err = generate_token(&config, &[]).unwrap_err();
        assert!(matches!(err, TokenError::Template(_)));
    }

    #[test]
    fn override_error_message_names_the_field() {
        let err = TokenError::Override {
            field: "iat",
            value: "soon".to_string(),
        };
        assert_eq!(err.to_string(), "failed to convert iat. iat: soon");
    }

    #[test]
    fn oversized_lifetime_aborts_issuance() {
        let mut config = test_config(r#"{"scope":{"app":{}}}"#);
        config.expire_secs = i64::MAX;
        assert!(matches!(
            generate_token(&config, &[]),
            Err(TokenError::Lifetime { expire_secs: i64::MAX })
        ));
        assert!(matches!(
            generate_admin_token(&config, &[]),
            Err(TokenError::Lifetime { expire_secs: i64::MAX })
        ));
    }

    #[test]
    fn token_kind_displays_lowercase() {
        assert_eq!(TokenKind::Admin.to_string(), "admin");
        assert_eq!(TokenKind::Scoped.to_string(), "scoped");
    }
}
