// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Persistence for the pricing document
//!
//! The store is the single owner of the on-disk document. Callers never touch
//! the file directly; they load the whole document or replace one subtree at a
//! time through [`DocumentStore`].

pub mod error;
pub mod file;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;

use async_trait::async_trait;
use dc_pricing_contract::{Factors, PricingDocument, Scales, Section, Subtree};

/// Replacement for exactly one top-level subtree of the document
#[derive(Debug, Clone, PartialEq)]
pub enum SubtreeUpdate {
    Sections(Vec<Section>),
    Factors(Factors),
    Scales(Scales),
}

impl SubtreeUpdate {
    pub fn subtree(&self) -> Subtree {
        match self {
            SubtreeUpdate::Sections(_) => Subtree::Sections,
            SubtreeUpdate::Factors(_) => Subtree::Factors,
            SubtreeUpdate::Scales(_) => Subtree::Scales,
        }
    }

    /// JSON form of the replacement subtree, as stored under [`Subtree::key`]
    pub fn into_value(self) -> serde_json::Result<serde_json::Value> {
        match self {
            SubtreeUpdate::Sections(sections) => serde_json::to_value(sections),
            SubtreeUpdate::Factors(factors) => serde_json::to_value(factors),
            SubtreeUpdate::Scales(scales) => serde_json::to_value(scales),
        }
    }
}

/// Access to the persisted pricing document
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the current document. Never fails: unreadable or unparsable
    /// storage yields the built-in defaults, and a subtree that does not
    /// decode yields that subtree's defaults.
    async fn load(&self) -> PricingDocument;

    /// Persist the whole document
    async fn save(&self, document: &PricingDocument) -> StoreResult<()>;

    /// Atomically load, replace one subtree and save. The other subtrees are
    /// written back exactly as stored, and nothing is written when the stored
    /// document cannot be read. Returns the document as written.
    async fn replace(&self, update: SubtreeUpdate) -> StoreResult<PricingDocument>;
}
