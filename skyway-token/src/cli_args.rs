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

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::TokenOptions;

/// SkyWay Auth Token CLI
///
/// Generate, decode and verify SkyWay Auth Tokens, or serve them over HTTP.
#[derive(Parser, Debug)]
#[clap(name = "skyway-token", version)]
pub struct Opt {
    /// Config file (default is $HOME/.skyway-cli.yaml)
    #[clap(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Generate a SkyWay Auth Token (or an Admin Auth Token with --admin).
    Generate(Generate),

    /// Decode a token read from stdin. The signature is NOT checked.
    Decode(Decode),

    /// Verify a token read from stdin.
    Verify(Verify),

    /// Serve SkyWay Auth Tokens over HTTP on GET /token.
    Serve(Serve),
}

/// Token settings shared by the commands that issue tokens.
#[derive(Args, Debug, Clone)]
pub struct TokenArgs {
    /// SkyWay App ID.
    #[clap(long = "app-id", env = "SKYWAY_APP_ID")]
    pub app_id: Option<String>,

    /// SkyWay Secret Key.
    #[clap(long = "secret-key", env = "SKYWAY_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Token lifetime in seconds [default: 3600].
    #[clap(long = "expire", env = "SKYWAY_TOKEN_EXPIRE")]
    pub expire: Option<i64>,

    /// Token template (JSON).
    #[clap(long = "tmpl", env = "SKYWAY_TOKEN_TMPL")]
    pub tmpl: Option<String>,
}

impl From<TokenArgs> for TokenOptions {
    fn from(args: TokenArgs) -> Self {
        TokenOptions {
            app_id: args.app_id,
            secret_key: args.secret_key,
            expire_secs: args.expire,
            template: args.tmpl,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct Generate {
    #[clap(flatten)]
    pub token: TokenArgs,

    /// Generate a SkyWay Admin Auth Token.
    #[clap(long = "admin")]
    pub admin: bool,

    /// Override a field, KEY=VALUE. May be repeated.
    ///
    /// For scoped tokens KEY is a dot-path into the template
    /// (e.g. scope.app.channels.0.name=lobby). For admin tokens KEY is one of
    /// jti, iat, exp or appId.
    #[clap(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct Decode {
    /// Decode a SkyWay Admin Auth Token.
    #[clap(long = "admin", short = 'a')]
    pub admin: bool,

    /// Pretty print JSON.
    #[clap(long = "pretty", short = 'p')]
    pub pretty: bool,
}

#[derive(Args, Debug, Clone)]
pub struct Verify {
    /// SkyWay Secret Key.
    #[clap(long = "secret-key", env = "SKYWAY_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct Serve {
    #[clap(flatten)]
    pub token: TokenArgs,

    /// HTTP server port.
    #[clap(long = "port", short = 'p', default_value_t = 8080)]
    pub port: u16,
}
