// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Admin login

use crate::auth::credentials_match;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use dc_pricing_contract::{LoginRequest, LoginResponse};
use serde_json::Value;
use tracing::{debug, info};

/// Exchange the admin credentials for a token
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ServerResult<Json<LoginResponse>> {
    let body = match body {
        Ok(Json(Value::Object(map))) if !map.is_empty() => Value::Object(map),
        Ok(_) => return Err(ServerError::NoLoginData),
        Err(rejection) => {
            debug!(%rejection, "Login body rejected");
            return Err(ServerError::NoLoginData);
        }
    };

    // Wrongly typed fields are treated the same as absent ones
    let request: LoginRequest = serde_json::from_value(body).unwrap_or_default();
    let (Some(username), Some(password)) = (
        request.username.filter(|u| !u.is_empty()),
        request.password.filter(|p| !p.is_empty()),
    ) else {
        debug!("Login attempt without username or password");
        return Err(ServerError::MissingCredentials);
    };

    if !credentials_match(&username, &password) {
        debug!(%username, "Login attempt with invalid credentials");
        return Err(ServerError::InvalidCredentials);
    }

    let token = state.tokens.issue(&username)?;
    info!(%username, "Admin logged in");
    Ok(Json(LoginResponse { token }))
}
