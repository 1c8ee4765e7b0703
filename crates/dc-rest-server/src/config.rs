// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server configuration

use chrono::Duration;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Signing key used when `SECRET_KEY` is not provided
pub const INSECURE_DEFAULT_SECRET: &str = "your-secret-key-here";

/// File name of the pricing document
pub const DOCUMENT_FILE_NAME: &str = "config.json";

/// Origins allowed to read API responses from a browser
pub const ALLOWED_ORIGINS: [&str; 2] = [
    "https://deal-cost-calculator.netlify.app",
    "http://localhost:5173",
];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,

    /// Path of the persisted pricing document
    pub document_path: PathBuf,

    /// HMAC secret for admin tokens
    pub jwt_secret: String,

    /// How long an admin token stays valid
    pub token_ttl: Duration,
}

impl ServerConfig {
    pub fn uses_insecure_secret(&self) -> bool {
        self.jwt_secret == INSECURE_DEFAULT_SECRET
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            document_path: default_document_path(),
            jwt_secret: INSECURE_DEFAULT_SECRET.to_string(),
            token_ttl: Duration::hours(24),
        }
    }
}

/// `config.json` next to the running executable, or in the working
/// directory when the executable path cannot be resolved.
pub fn default_document_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DOCUMENT_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(DOCUMENT_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:5000".parse().unwrap());
        assert_eq!(config.token_ttl, Duration::hours(24));
        assert!(config.uses_insecure_secret());
        assert!(config.document_path.ends_with(DOCUMENT_FILE_NAME));
    }

    #[test]
    fn custom_secret_is_not_flagged() {
        let config = ServerConfig {
            jwt_secret: "rotated".to_string(),
            ..Default::default()
        };
        assert!(!config.uses_insecure_secret());
    }
}
