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

//! Shared application state passed to every Axum handler via `State`.

use std::sync::Arc;

use crate::config::TokenConfig;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// App ID, signing secret, lifetime and template used for every token.
    pub token_config: Arc<TokenConfig>,
}

impl AppState {
    pub fn new(token_config: TokenConfig) -> Self {
        Self {
            token_config: Arc::new(token_config),
        }
    }
}
