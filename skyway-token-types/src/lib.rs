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

//! Shared types for SkyWay Auth Tokens.
//!
//! This crate defines the claim model carried inside SkyWay Auth Tokens and
//! SkyWay Admin Auth Tokens, plus the response envelope used by the token
//! server. It is intentionally framework-agnostic: no axum, no JWT library.

pub mod error;
pub mod responses;
pub mod token;

pub use error::APIError;
pub use responses::APIResponse;
pub use token::{AdminClaims, ScopedClaims, TokenScope};
