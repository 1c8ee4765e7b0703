// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for pricing document validation

use thiserror::Error;

/// Errors raised while checking a caller-supplied subtree
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Invalid data format")]
    InvalidFormat,

    #[error("Invalid data format: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}
