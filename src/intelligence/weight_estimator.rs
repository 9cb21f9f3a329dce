// ABOUTME: Converts a parsed quantity into an estimated weight in grams
// ABOUTME: Unit-conversion constants with ingredient-specific overrides for piece/medium units
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Weight Estimator
//!
//! Deliberately coarse household-measure conversion, not a precision system:
//! a cup is 150g regardless of contents, and an unknown unit is worth 30g
//! per unit. "piece"/"medium" amounts depend on the ingredient (an onion is
//! heavier than a tomato). Unknown units never fail; they fall through to
//! the generic small-measure default.

use std::collections::HashMap;

use crate::models::Quantity;

/// Flat weight assumed when a quantity carries no parseable value
pub const UNKNOWN_QUANTITY_GRAMS: f64 = 30.0;

/// Grams per unit for unrecognized units (a generic "small measure")
pub const DEFAULT_UNIT_GRAMS: f64 = 30.0;

/// Grams per teaspoon
pub const TEASPOON_GRAMS: f64 = 5.0;

/// Grams per tablespoon
pub const TABLESPOON_GRAMS: f64 = 15.0;

/// Grams per cup (approximate household measure)
pub const CUP_GRAMS: f64 = 150.0;

/// Grams per piece when no ingredient-specific override applies
pub const PIECE_DEFAULT_GRAMS: f64 = 100.0;

/// Per-piece weights for common whole ingredients, matched by substring
const PIECE_OVERRIDES: &[(&str, f64)] = &[("onion", 150.0), ("tomato", 120.0), ("potato", 150.0)];

/// Result of converting a quantity into grams
#[derive(Debug, Clone, PartialEq)]
pub struct WeightEstimate {
    /// Normalized "<value> <unit>" form, or the raw text when no unit was
    /// recognized
    pub standard_quantity: String,
    /// Estimated weight in grams, never negative
    pub weight_in_grams: f64,
}

/// Convert a parsed quantity into an estimated weight in grams
///
/// `unit_table` supplies extra unit-to-grams multipliers from the reference
/// unit table; the built-in constants always win, and the table is consulted
/// only before the generic default.
#[must_use]
pub fn to_grams(
    ingredient_name: &str,
    quantity: &Quantity,
    unit_table: &HashMap<String, f64>,
) -> WeightEstimate {
    let Some(value) = quantity.value else {
        return WeightEstimate {
            standard_quantity: quantity.raw.clone(),
            weight_in_grams: UNKNOWN_QUANTITY_GRAMS,
        };
    };

    let unit = quantity.unit.as_deref();
    let grams_per_unit = match unit {
        Some("g" | "gram" | "grams") => 1.0,
        Some("kg" | "kilogram") => 1000.0,
        Some("tsp" | "teaspoon") => TEASPOON_GRAMS,
        Some("tbsp" | "tablespoon") => TABLESPOON_GRAMS,
        Some("cup") => CUP_GRAMS,
        Some("piece" | "medium") => piece_grams(ingredient_name),
        Some(other) => unit_table
            .get(other)
            .copied()
            .unwrap_or(DEFAULT_UNIT_GRAMS),
        None => DEFAULT_UNIT_GRAMS,
    };

    let standard_quantity = unit.map_or_else(
        || quantity.raw.clone(),
        |unit| format!("{value} {unit}"),
    );

    WeightEstimate {
        standard_quantity,
        weight_in_grams: value * grams_per_unit,
    }
}

/// Per-piece weight for the ingredient, via case-insensitive substring match
fn piece_grams(ingredient_name: &str) -> f64 {
    let name = ingredient_name.to_lowercase();
    PIECE_OVERRIDES
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map_or(PIECE_DEFAULT_GRAMS, |(_, grams)| *grams)
}
