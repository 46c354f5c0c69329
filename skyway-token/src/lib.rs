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

//! SkyWay Auth Token library.
//!
//! The [`token`] module is the token engine: template materialization, claim
//! building, HS256 signing, inspection-only decoding and the ordered
//! verification pipeline. [`routes`] and [`state`] wrap it in an Axum token
//! server, and [`cli_args`] defines the `skyway-token` command line. The binary
//! entry point (`main.rs`) is a thin wrapper around this library.

pub mod cli_args;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod token;

pub use config::TokenConfig;
pub use token::{
    decode_admin_token, decode_token, generate_admin_token, generate_token, verify_token,
    TokenError, TokenKind, ValidationError,
};
