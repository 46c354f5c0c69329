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

//! Token configuration.
//!
//! Values are resolved with the following precedence, highest first:
//! command-line flags, environment variables (`SKYWAY_APP_ID`,
//! `SKYWAY_SECRET_KEY`, `SKYWAY_TOKEN_EXPIRE`, `SKYWAY_TOKEN_TMPL`), the YAML
//! config file (`$HOME/.skyway-cli.yaml` unless `--config` is given), and
//! built-in defaults. Flags and environment variables are handled by clap in
//! [`crate::cli_args`]; this module merges the result with the file.

use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::Deserialize;
use thiserror::Error;

/// Default token lifetime in seconds.
pub const DEFAULT_EXPIRE_SECS: i64 = 3600;

/// Config file name looked up in the home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".skyway-cli.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is required. Set it with a flag, an environment variable or the config file")]
    Missing(&'static str),

    #[error("expire should be zero or more seconds. expire: {0}")]
    InvalidExpire(i64),

    #[error("failed to load config file: {0}")]
    File(#[from] config::ConfigError),
}

/// Everything the token engine needs to issue and verify tokens.
///
/// Passed explicitly into every call; the engine holds no global state.
#[derive(Clone)]
pub struct TokenConfig {
    /// SkyWay application ID, stamped into `scope.app.id` / `appId`.
    pub app_id: String,
    /// Shared HMAC-SHA256 secret.
    pub secret_key: String,
    /// Lifetime of issued tokens in seconds.
    pub expire_secs: i64,
    /// JSON token template for scoped tokens.
    pub template: String,
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("app_id", &self.app_id)
            .field("secret_key", &"[REDACTED]")
            .field("expire_secs", &self.expire_secs)
            .field("template", &self.template)
            .finish()
    }
}

/// Contents of the YAML config file.
///
/// ```yaml
/// skyway:
///   app_id: 402e60fb-9698-4eb9-9ee2-6d3d66a78068
///   secret_key: ...
///   token:
///     expire: 3600
///     tmpl: '{"version":2,"scope":{"app":{"turn":true}}}'
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub skyway: SkywaySection,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SkywaySection {
    pub app_id: Option<String>,
    pub secret_key: Option<String>,
    #[serde(default)]
    pub token: TokenSection,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct TokenSection {
    pub expire: Option<i64>,
    pub tmpl: Option<String>,
}

impl FileSettings {
    /// Load settings from `path`, or from `$HOME/.skyway-cli.yaml` when `None`.
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let source = match path {
            Some(path) => File::from(path).required(true),
            None => match default_config_path() {
                Some(path) => File::from(path.as_path()).required(false),
                None => return Ok(Self::default()),
            },
        };

        let settings = Config::builder().add_source(source).build()?;
        let settings = settings.try_deserialize::<FileSettings>()?;
        tracing::debug!(?path, "Loaded config");
        Ok(settings)
    }
}

fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(DEFAULT_CONFIG_FILE))
}

/// Token settings gathered from flags and environment, before the file is merged in.
#[derive(Debug, Default, Clone)]
pub struct TokenOptions {
    pub app_id: Option<String>,
    pub secret_key: Option<String>,
    pub expire_secs: Option<i64>,
    pub template: Option<String>,
}

impl TokenOptions {
    /// Fill every unset option from the config file.
    pub fn merge(self, file: &FileSettings) -> Self {
        let skyway = &file.skyway;
        Self {
            app_id: self.app_id.or_else(|| skyway.app_id.clone()),
            secret_key: self.secret_key.or_else(|| skyway.secret_key.clone()),
            expire_secs: self.expire_secs.or(skyway.token.expire),
            template: self.template.or_else(|| skyway.token.tmpl.clone()),
        }
    }

    /// Build a [`TokenConfig`]. `app_id` and `secret_key` are required and
    /// `expire_secs` must not be negative.
    ///
    /// A missing template becomes an empty string, which fails at issuance
    /// time for scoped tokens only.
    pub fn into_token_config(self) -> Result<TokenConfig, ConfigError> {
        let expire_secs = self.expire_secs.unwrap_or(DEFAULT_EXPIRE_SECS);
        if expire_secs < 0 {
            return Err(ConfigError::InvalidExpire(expire_secs));
        }

        Ok(TokenConfig {
            app_id: non_empty(self.app_id).ok_or(ConfigError::Missing("app-id"))?,
            secret_key: non_empty(self.secret_key).ok_or(ConfigError::Missing("secret-key"))?,
            expire_secs,
            template: self.template.unwrap_or_default(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
