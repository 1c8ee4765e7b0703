// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Store error types

use std::path::PathBuf;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures while persisting the document
///
/// `load` never surfaces these; it falls back to the default document.
/// `replace` does, so it never writes over a document it could not read.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to overwrite unparsable pricing document {}: {}", .path.display(), .reason)]
    Unparsable { path: PathBuf, reason: String },

    #[error("Failed to serialize pricing document: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
