// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Main server implementation

use crate::auth::require_auth;
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handlers;
use crate::middleware::cors;
use crate::state::AppState;
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// REST API server
pub struct Server {
    config: ServerConfig,
    app: Router,
}

impl Server {
    /// Create a new server backed by the document at `config.document_path`
    pub async fn new(config: ServerConfig) -> ServerResult<Self> {
        let state = AppState::new(&config);
        Self::with_state(config, state).await
    }

    /// Construct a server from an already-built app state
    pub async fn with_state(config: ServerConfig, state: AppState) -> ServerResult<Self> {
        let document = state.store.load().await;
        info!(
            path = %config.document_path.display(),
            sections = document.sections.len(),
            factor_terms = document.factors.len(),
            scale_tables = document.scales.len(),
            "Pricing document loaded"
        );

        Ok(Self {
            config,
            app: build_router(state),
        })
    }

    /// Run the server until Ctrl-C
    pub async fn run(self) -> ServerResult<()> {
        let addr = self.config.bind_addr;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Starting server on {}", addr);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|err| ServerError::Internal(format!("REST server error: {err}")))?;

        info!("Server stopped");
        Ok(())
    }
}

/// Build the Axum application with routes and middleware
pub fn build_router(state: AppState) -> Router {
    let middleware_stack = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(cors));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/admin/login", post(handlers::admin::login));

    let admin_routes = Router::new()
        .route(
            "/admin/items",
            get(handlers::pricing::get_items).post(handlers::pricing::update_items),
        )
        .route(
            "/admin/factors",
            get(handlers::pricing::get_factors).post(handlers::pricing::update_factors),
        )
        .route(
            "/admin/scales",
            get(handlers::pricing::get_scales).post(handlers::pricing::update_scales),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .nest("/api", public_routes.merge(admin_routes))
        .with_state(state)
        .layer(middleware_stack)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for Ctrl-C, serving until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
