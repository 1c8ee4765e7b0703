// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dc_config_store::StoreError;
use dc_pricing_contract::{ContractError, ErrorResponse, MessageResponse};

/// Server result type
pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
///
/// Authentication failures answer with `{"message": ...}`; everything else
/// answers with `{"error": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Token is missing")]
    MissingToken,

    #[error("Token is invalid")]
    InvalidToken,

    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No data provided")]
    NoLoginData,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Validation(#[from] ContractError),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::MissingToken
            | ServerError::InvalidToken
            | ServerError::MissingCredentials
            | ServerError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ServerError::NoLoginData | ServerError::BadRequest(_) | ServerError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::Storage(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn uses_message_body(&self) -> bool {
        matches!(
            self,
            ServerError::MissingToken
                | ServerError::InvalidToken
                | ServerError::MissingCredentials
                | ServerError::InvalidCredentials
                | ServerError::NoLoginData
        )
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        if self.uses_message_body() {
            (status, Json(MessageResponse::new(self.to_string()))).into_response()
        } else {
            let body = ErrorResponse {
                error: self.to_string(),
            };
            (status, Json(body)).into_response()
        }
    }
}

/// Convert IO errors
impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {}", err))
    }
}
