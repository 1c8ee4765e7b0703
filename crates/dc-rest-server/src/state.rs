// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server state management

use crate::auth::TokenIssuer;
use crate::config::ServerConfig;
use dc_config_store::{DocumentStore, JsonFileStore};
use std::sync::Arc;

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    /// Pricing document storage
    pub store: Arc<dyn DocumentStore>,

    /// Admin token issuer
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    /// Create state backed by the JSON document at `config.document_path`
    pub fn new(config: &ServerConfig) -> Self {
        let store = Arc::new(JsonFileStore::new(config.document_path.clone()));
        Self::with_store(config, store)
    }

    pub fn with_store(config: &ServerConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            tokens: Arc::new(TokenIssuer::new(&config.jwt_secret, config.token_ttl)),
        }
    }
}
