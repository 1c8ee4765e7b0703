// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Pricing document endpoints
//!
//! GETs return one subtree of the document as-is. POSTs validate the body and
//! replace that subtree wholesale; the other two are left untouched.

use crate::auth::Claims;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use dc_config_store::SubtreeUpdate;
use dc_pricing_contract::{validation, Factors, MessageResponse, Scales, Section};
use serde_json::Value;
use tracing::{debug, info};

pub async fn get_items(State(state): State<AppState>) -> ServerResult<Json<Vec<Section>>> {
    Ok(Json(state.store.load().await.sections))
}

pub async fn update_items(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: Result<Json<Value>, JsonRejection>,
) -> ServerResult<Json<MessageResponse>> {
    let sections = validation::parse_sections_update(json_body(body)?)?;
    replace(&state, &claims, SubtreeUpdate::Sections(sections)).await
}

pub async fn get_factors(State(state): State<AppState>) -> ServerResult<Json<Factors>> {
    Ok(Json(state.store.load().await.factors))
}

pub async fn update_factors(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: Result<Json<Value>, JsonRejection>,
) -> ServerResult<Json<MessageResponse>> {
    let factors = validation::parse_factors(json_body(body)?)?;
    replace(&state, &claims, SubtreeUpdate::Factors(factors)).await
}

pub async fn get_scales(State(state): State<AppState>) -> ServerResult<Json<Scales>> {
    Ok(Json(state.store.load().await.scales))
}

pub async fn update_scales(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: Result<Json<Value>, JsonRejection>,
) -> ServerResult<Json<MessageResponse>> {
    let scales = validation::parse_scales(json_body(body)?)?;
    replace(&state, &claims, SubtreeUpdate::Scales(scales)).await
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> ServerResult<Value> {
    body.map(|Json(value)| value).map_err(|rejection| {
        debug!(%rejection, "Request body rejected");
        ServerError::BadRequest("Invalid data format".to_string())
    })
}

async fn replace(
    state: &AppState,
    claims: &Claims,
    update: SubtreeUpdate,
) -> ServerResult<Json<MessageResponse>> {
    let subtree = update.subtree();
    state.store.replace(update).await?;
    info!(subtree = subtree.key(), user = %claims.user, "Pricing document updated");
    Ok(Json(MessageResponse::updated(subtree)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use serde_json::json;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    #[tokio::test]
    #[traced_test]
    async fn update_is_attributed_to_the_token_user() {
        let dir = TempDir::new().unwrap();
        let config = ServerConfig {
            document_path: dir.path().join("config.json"),
            ..Default::default()
        };
        let claims = Claims {
            user: "Camryn".to_string(),
            iat: 0,
            exp: 1,
        };

        let Json(response) = update_scales(
            State(AppState::new(&config)),
            Extension(claims),
            Ok(Json(json!({"installation": {"0-4": 1.0}}))),
        )
        .await
        .unwrap();

        assert_eq!(response.message, "Scales updated successfully");
        assert!(logs_contain("Pricing document updated"));
        assert!(logs_contain("user=Camryn"));
    }
}
