// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Built-in default pricing document
//!
//! Served until the first admin write, and used to backfill `factors` and
//! `scales` when a stored document lacks them.

use crate::types::{FactorTable, Factors, Item, PricingDocument, ScaleTable, Scales, Section};
use indexmap::IndexMap;

const PRICE_BANDS: [&str; 4] = ["0-20000", "20001-50000", "50001-100000", "100000+"];
const DEPOSITS: [&str; 3] = ["0%", "10%", "15%"];

/// Factor rows per term, one row per deposit in `DEPOSITS` order
const FACTOR_ROWS: [(&str, [[f64; 4]; 3]); 3] = [
    (
        "36_months",
        [
            [0.03891, 0.03761, 0.03641, 0.03561],
            [0.04012, 0.03882, 0.03762, 0.03682],
            [0.04133, 0.04003, 0.03883, 0.03803],
        ],
    ),
    (
        "48_months",
        [
            [0.03133, 0.03003, 0.02883, 0.02803],
            [0.03254, 0.03124, 0.03004, 0.02924],
            [0.03375, 0.03245, 0.03125, 0.03045],
        ],
    ),
    (
        "60_months",
        [
            [0.02695, 0.02565, 0.02445, 0.02365],
            [0.02816, 0.02686, 0.02566, 0.02486],
            [0.02937, 0.02807, 0.02687, 0.02607],
        ],
    ),
];

/// The complete default document
pub fn default_document() -> PricingDocument {
    PricingDocument {
        sections: default_sections(),
        factors: default_factors(),
        scales: default_scales(),
    }
}

pub fn default_sections() -> Vec<Section> {
    vec![
        section(
            "hardware",
            "Hardware",
            vec![
                item("switchboard", "Switchboard", 3000.0, true),
                item("desktop-phone", "Desktop Phone", 1200.0, true),
                item("cordless-phone", "Cordless Phone", 1500.0, true),
                item("mobile-apps", "Mobile Apps", 500.0, true),
                item("additional-hardware", "Additional Hardware", 2000.0, false),
            ],
        ),
        section(
            "connectivity",
            "Connectivity",
            vec![
                item("vodacom-lte", "Vodacom LTE", 489.0, false),
                item("fiber-line", "Fiber Line", 699.0, false),
            ],
        ),
        section(
            "licensing",
            "Licensing",
            vec![
                item("basic-license", "Basic License", 49.0, false),
                item("premium-license", "Premium License", 89.0, false),
            ],
        ),
    ]
}

pub fn default_factors() -> Factors {
    FACTOR_ROWS
        .iter()
        .map(|(term, rows)| {
            let by_deposit: IndexMap<String, FactorTable> = DEPOSITS
                .iter()
                .zip(rows.iter())
                .map(|(deposit, row)| {
                    let by_band: FactorTable = PRICE_BANDS
                        .iter()
                        .zip(row.iter())
                        .map(|(band, factor)| (band.to_string(), *factor))
                        .collect();
                    (deposit.to_string(), by_band)
                })
                .collect();
            (term.to_string(), by_deposit)
        })
        .collect()
}

pub fn default_scales() -> Scales {
    let mut scales = IndexMap::new();
    scales.insert(
        "installation".to_string(),
        scale(&[
            ("0-4", 2500.0),
            ("5-8", 3500.0),
            ("9-16", 4500.0),
            ("17-32", 6000.0),
            ("33+", 7500.0),
        ]),
    );
    scales.insert(
        "finance_fee".to_string(),
        scale(&[("0-20000", 750.0), ("20001-50000", 1500.0), ("50001+", 2500.0)]),
    );
    scales.insert(
        "gross_profit".to_string(),
        scale(&[
            ("0-4", 15.0),
            ("5-8", 20.0),
            ("9-16", 25.0),
            ("17-32", 30.0),
            ("33+", 35.0),
        ]),
    );
    scales
}

fn section(id: &str, title: &str, items: Vec<Item>) -> Section {
    Section {
        id: id.to_string(),
        title: title.to_string(),
        items,
    }
}

fn item(id: &str, name: &str, cost: f64, locked: bool) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        cost,
        quantity: 0.0,
        locked,
    }
}

fn scale(rows: &[(&str, f64)]) -> ScaleTable {
    rows.iter().map(|(band, value)| (band.to_string(), *value)).collect()
}
