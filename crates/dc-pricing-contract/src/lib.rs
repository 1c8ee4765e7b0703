// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Pricing document contract for the deal cost calculator
//!
//! Defines the persisted document (sections of line items, financing factors
//! and fee scales), the built-in default document, and the validation applied
//! to caller-supplied subtrees before they replace stored data. These types are
//! shared by the config store and the REST server.

pub mod bands;
pub mod defaults;
pub mod error;
pub mod types;
pub mod validation;

pub use bands::Band;
pub use defaults::default_document;
pub use error::ContractError;
pub use types::*;
