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

//! `skyway-token` entry point.
//!
//! Generates, decodes and verifies SkyWay Auth Tokens, or runs a small Axum
//! server that hands out freshly signed tokens.

use std::io::BufRead;

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use skyway_token::cli_args::{Decode, Generate, Mode, Opt, Serve, Verify};
use skyway_token::config::{FileSettings, TokenOptions};
use skyway_token::routes;
use skyway_token::state::AppState;
use skyway_token::{
    decode_admin_token, decode_token, generate_admin_token, generate_token, verify_token,
    TokenKind, ValidationError,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opt = Opt::parse();
    let file = FileSettings::load(opt.config.as_deref())?;

    match opt.mode {
        Mode::Generate(args) => generate(args, &file),
        Mode::Decode(args) => decode(args),
        Mode::Verify(args) => verify(args, &file),
        Mode::Serve(args) => serve(args, &file).await,
    }
}

fn generate(args: Generate, file: &FileSettings) -> anyhow::Result<()> {
    let config = TokenOptions::from(args.token)
        .merge(file)
        .into_token_config()?;
    debug!(?config, admin = args.admin, "Generating token");

    let token = if args.admin {
        generate_admin_token(&config, &args.overrides)?
    } else {
        generate_token(&config, &args.overrides)?
    };
    println!("{token}");
    Ok(())
}

fn decode(args: Decode) -> anyhow::Result<()> {
    let token = read_token()?;
    if args.admin {
        print_json(&decode_admin_token(&token)?, args.pretty)
    } else {
        print_json(&decode_token(&token)?, args.pretty)
    }
}

fn verify(args: Verify, file: &FileSettings) -> anyhow::Result<()> {
    let secret_key = args
        .secret_key
        .or_else(|| file.skyway.secret_key.clone())
        .filter(|key| !key.is_empty())
        .context("secret-key is required. Set it with a flag, an environment variable or the config file")?;

    let token = read_token()?;
    println!("{}", verify_report(verify_token(&token, &secret_key))?);
    Ok(())
}

/// Line printed for an accepted token; a rejection becomes the command's error.
fn verify_report(result: Result<TokenKind, ValidationError>) -> anyhow::Result<&'static str> {
    match result {
        Ok(kind) => {
            debug!(%kind, "Token accepted");
            Ok("Token is valid")
        }
        Err(reason) => bail!("Token is invalid: [{}] {reason}", reason.code()),
    }
}

async fn serve(args: Serve, file: &FileSettings) -> anyhow::Result<()> {
    let config = TokenOptions::from(args.token)
        .merge(file)
        .into_token_config()?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState::new(config);
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port))
        .await
        .with_context(|| format!("failed to bind port {}", args.port))?;

    info!("Token server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Read a single token line from stdin.
fn read_token() -> anyhow::Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read token from stdin")?;

    let token = line.trim();
    if token.is_empty() {
        bail!("no token given on stdin");
    }
    Ok(token.to_string())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_token_prints_exactly_token_is_valid() {
        assert_eq!(verify_report(Ok(TokenKind::Scoped)).unwrap(), "Token is valid");
        assert_eq!(verify_report(Ok(TokenKind::Admin)).unwrap(), "Token is valid");
    }

    #[test]
    fn rejected_token_reports_reason_code() {
        let err = verify_report(Err(ValidationError::JtiMissing)).unwrap_err();
        assert_eq!(err.to_string(), "Token is invalid: [JTI_MISSING] jti is required");
    }
}
