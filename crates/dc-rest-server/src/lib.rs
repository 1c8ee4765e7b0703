// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Deal cost calculator REST API server
//!
//! Serves the pricing document (line items, financing factors and fee scales)
//! to the calculator front end, and lets a single admin account replace each
//! part of it. Reads are public to authenticated admins only; every write
//! replaces one subtree of the document wholesale.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::Server;
pub use state::AppState;
