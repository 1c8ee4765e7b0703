// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Validation of caller-supplied subtrees before they replace stored data
//!
//! The `parse_*` helpers take the raw request body, perform the top-level
//! presence check, decode into the typed subtree and run its validators.

use crate::bands::Band;
use crate::error::ContractError;
use crate::types::{Factors, Scales, Section};
use serde::Deserialize;
use serde_json::Value;
use validator::{Validate, ValidationError};

/// Scale tables keyed by band labels. Any other table (e.g. `additional_costs`)
/// is free-form: arbitrary keys, non-negative values.
pub const BANDED_SCALES: [&str; 3] = ["installation", "finance_fee", "gross_profit"];

/// Body of `POST /admin/items`
#[derive(Debug, Deserialize, Validate)]
pub struct SectionsUpdate {
    #[validate(nested)]
    pub sections: Vec<Section>,
}

/// Body of `POST /admin/factors`
#[derive(Debug, Deserialize, Validate)]
#[serde(transparent)]
pub struct FactorsUpdate {
    #[validate(custom(function = "check_factor_tables"))]
    pub factors: Factors,
}

/// Body of `POST /admin/scales`
#[derive(Debug, Deserialize, Validate)]
#[serde(transparent)]
pub struct ScalesUpdate {
    #[validate(custom(function = "check_scale_tables"))]
    pub scales: Scales,
}

/// Decode `{"sections": [...]}`
pub fn parse_sections_update(body: Value) -> Result<Vec<Section>, ContractError> {
    if body.get("sections").is_none() {
        return Err(ContractError::InvalidFormat);
    }
    let update: SectionsUpdate = serde_json::from_value(body)?;
    update.validate()?;
    Ok(update.sections)
}

/// Decode a complete factors table; an empty object counts as missing data
pub fn parse_factors(body: Value) -> Result<Factors, ContractError> {
    let update: FactorsUpdate = serde_json::from_value(non_empty_object(body)?)?;
    update.validate()?;
    Ok(update.factors)
}

/// Decode a complete set of scale tables; an empty object counts as missing data
pub fn parse_scales(body: Value) -> Result<Scales, ContractError> {
    let update: ScalesUpdate = serde_json::from_value(non_empty_object(body)?)?;
    update.validate()?;
    Ok(update.scales)
}

fn non_empty_object(body: Value) -> Result<Value, ContractError> {
    match &body {
        Value::Object(map) if !map.is_empty() => Ok(body),
        _ => Err(ContractError::InvalidFormat),
    }
}

/// Price bands must parse and every factor must lie in `[0, 1]`.
/// Zero is allowed: the editor saves a cleared cell as 0.
pub fn check_factor_tables(factors: &Factors) -> Result<(), ValidationError> {
    for (term, deposits) in factors {
        for (deposit, bands) in deposits {
            for (band, factor) in bands {
                let at = format!("{}.{}.{}", term, deposit, band);
                check_band(&at, band)?;
                if !(0.0..=1.0).contains(factor) {
                    return Err(invalid(
                        "factor_range",
                        format!("factor {} at {} must be between 0 and 1", factor, at),
                    ));
                }
            }
        }
    }
    Ok(())
}

/// Banded tables must use band labels; every value must be non-negative
pub fn check_scale_tables(scales: &Scales) -> Result<(), ValidationError> {
    for (name, table) in scales {
        let banded = BANDED_SCALES.contains(&name.as_str());
        for (key, value) in table {
            let at = format!("{}.{}", name, key);
            if banded {
                check_band(&at, key)?;
            }
            if !value.is_finite() || *value < 0.0 {
                return Err(invalid(
                    "non_negative",
                    format!("value {} at {} must be a non-negative number", value, at),
                ));
            }
        }
    }
    Ok(())
}

fn check_band(at: &str, key: &str) -> Result<Band, ValidationError> {
    key.parse::<Band>()
        .map_err(|reason| invalid("band", format!("invalid band at {}: {}", at, reason)))
}

fn invalid(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}
