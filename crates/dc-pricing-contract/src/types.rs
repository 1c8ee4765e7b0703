// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Document and payload types for the pricing API

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Price band -> factor, e.g. `"0-20000" -> 0.03891`
pub type FactorTable = IndexMap<String, f64>;

/// Term -> deposit -> price band -> factor, e.g. `"36_months" -> "10%" -> ...`
pub type Factors = IndexMap<String, IndexMap<String, FactorTable>>;

/// Band label -> value, e.g. `"0-4" -> 2500`
pub type ScaleTable = IndexMap<String, f64>;

/// Named scale tables (`installation`, `finance_fee`, `gross_profit`, ...)
pub type Scales = IndexMap<String, ScaleTable>;

/// The persisted pricing document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PricingDocument {
    #[validate(nested)]
    pub sections: Vec<Section>,
    #[validate(custom(function = "crate::validation::check_factor_tables"))]
    pub factors: Factors,
    #[validate(custom(function = "crate::validation::check_scale_tables"))]
    pub scales: Scales,
}

/// A named group of purchasable items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<Item>,
}

/// A priced line item
///
/// `locked` is advisory: the calculator front end uses it to stop end users
/// from editing the row. The server stores and returns it but never enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[validate(range(min = 0.0, message = "cost must be a non-negative number"))]
    pub cost: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "quantity must be a non-negative number"))]
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub locked: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Which top-level subtree of the document a request touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subtree {
    Sections,
    Factors,
    Scales,
}

impl Subtree {
    /// Key of the subtree in the persisted document
    pub fn key(self) -> &'static str {
        match self {
            Subtree::Sections => "sections",
            Subtree::Factors => "factors",
            Subtree::Scales => "scales",
        }
    }

    /// Label used in user-facing confirmation messages
    pub fn label(self) -> &'static str {
        match self {
            Subtree::Sections => "Items",
            Subtree::Factors => "Factors",
            Subtree::Scales => "Scales",
        }
    }
}

/// Admin login request
///
/// Both fields are optional on the wire so a missing field can be reported
/// distinctly from a wrong one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Admin login response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Plain confirmation or error message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Confirmation returned after a subtree has been replaced
    pub fn updated(subtree: Subtree) -> Self {
        Self::new(format!("{} updated successfully", subtree.label()))
    }
}

/// Error body used by the data endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
