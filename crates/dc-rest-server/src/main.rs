// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Deal cost calculator REST API server binary

use clap::Parser;
use dc_logging::{redact, CliLoggingArgs};
use dc_rest_server::config::{default_document_path, INSECURE_DEFAULT_SECRET};
use dc_rest_server::{Server, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind address for the server
    #[arg(short, long, env = "DC_BIND", default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    /// Pricing document path (defaults to config.json beside the executable)
    #[arg(short, long, env = "DC_DOCUMENT")]
    document: Option<PathBuf>,

    /// Secret used to sign admin tokens
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    #[command(flatten)]
    logging: CliLoggingArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();
    let args = Args::parse();

    args.logging.init("dc-rest-server")?;

    tracing::info!("Starting deal cost calculator API server");

    let config = ServerConfig {
        bind_addr: args.bind,
        document_path: args.document.unwrap_or_else(default_document_path),
        jwt_secret: args
            .secret_key
            .unwrap_or_else(|| INSECURE_DEFAULT_SECRET.to_string()),
        ..Default::default()
    };

    if config.uses_insecure_secret() {
        tracing::warn!("SECRET_KEY is not set, signing tokens with the built-in development key");
    } else {
        tracing::info!(secret = redact(&config.jwt_secret), "Token signing key configured");
    }

    let server = Server::new(config).await?;
    server.run().await?;

    Ok(())
}
