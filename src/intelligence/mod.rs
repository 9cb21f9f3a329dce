// ABOUTME: Core normalization-and-aggregation pipeline for dish nutrition estimation
// ABOUTME: Quantity parsing, weight estimation, resolution, calculation, aggregation, serving scaling
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Estimation Pipeline
//!
//! The deterministic core of the estimator, leaf-first:
//!
//! - [`quantity_parser`]: free-text quantity -> (value, unit)
//! - [`weight_estimator`]: (value, unit, ingredient) -> grams
//! - [`ingredient_resolver`]: ingredient name -> reference record
//! - [`nutrition_calculator`]: (record, grams) -> nutrition contribution
//! - [`dish_aggregator`]: per-ingredient fan-out and dish totals
//! - [`serving_normalizer`]: dish totals -> per-serving values
//!
//! Every step is a coarse, explainable heuristic with a layered fallback;
//! malformed input degrades to documented defaults instead of failing.

/// Per-ingredient fan-out and dish totals
pub mod dish_aggregator;
/// Tiered fuzzy matching against the reference table
pub mod ingredient_resolver;
/// Per-100g scaling and keyword-heuristic fallbacks
pub mod nutrition_calculator;
/// Free-text quantity parsing
pub mod quantity_parser;
/// Category-based per-serving rescaling
pub mod serving_normalizer;
/// Quantity-to-grams conversion heuristics
pub mod weight_estimator;

pub use dish_aggregator::{AggregatedDish, DishAggregator};
pub use ingredient_resolver::resolve;
pub use nutrition_calculator::NutritionCalculator;
pub use quantity_parser::parse;
pub use serving_normalizer::{normalize, serving_profile};
pub use weight_estimator::{to_grams, WeightEstimate};
