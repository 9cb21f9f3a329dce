// ABOUTME: Computes absolute nutrition contributions from per-100g records and weights
// ABOUTME: Falls back to an external estimator, then a keyword-heuristic table, on unknown foods
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Nutrition Calculator
//!
//! For a resolved record the contribution is a straight per-100g scaling.
//! For an unknown food the calculator consults the external nutrition
//! estimator (one attempt, under a timeout) and otherwise applies a fixed
//! keyword-heuristic table keyed on substrings of the ingredient name.
//!
//! Absence of data always resolves to some numeric estimate; the `matched`
//! flag tells downstream consumers that a fallback was used.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::llm::NutritionEstimator;
use crate::models::{NutritionRecord, NutritionVector};

/// Per-100g profiles keyed on ingredient-name substrings, first match wins
const KEYWORD_PROFILES: &[(&[&str], NutritionVector)] = &[
    (
        &["oil", "ghee", "butter"],
        NutritionVector::new(900.0, 0.0, 0.0, 100.0, 0.0),
    ),
    (
        &["sugar", "jaggery"],
        NutritionVector::new(400.0, 0.0, 100.0, 0.0, 0.0),
    ),
    (
        &["paneer", "cheese"],
        NutritionVector::new(300.0, 20.0, 5.0, 25.0, 0.0),
    ),
    (
        &["chicken", "mutton", "meat"],
        NutritionVector::new(200.0, 25.0, 0.0, 10.0, 0.0),
    ),
    (
        &["rice", "wheat", "flour"],
        NutritionVector::new(350.0, 8.0, 75.0, 1.0, 3.0),
    ),
    (
        &["vegetable", "sabzi"],
        NutritionVector::new(40.0, 2.0, 8.0, 0.2, 3.0),
    ),
];

/// Generic low-value per-100g profile when no keyword applies
const GENERIC_PROFILE: NutritionVector = NutritionVector::new(50.0, 2.0, 10.0, 0.5, 1.0);

/// Computes nutrition contributions, with layered fallbacks for unknown foods
pub struct NutritionCalculator {
    estimator: Option<Arc<dyn NutritionEstimator>>,
    estimator_timeout: Duration,
}

impl NutritionCalculator {
    /// Create a calculator; `estimator` is the optional external
    /// collaborator consulted before the keyword heuristic
    #[must_use]
    pub fn new(estimator: Option<Arc<dyn NutritionEstimator>>, estimator_timeout: Duration) -> Self {
        Self {
            estimator,
            estimator_timeout,
        }
    }

    /// Compute the nutrition contribution for one ingredient
    ///
    /// Returns the contribution and whether it came from the reference table
    /// (`true`) or a fallback (`false`). Never fails: every path yields a
    /// numeric estimate.
    pub async fn compute(
        &self,
        record: Option<&NutritionRecord>,
        weight_in_grams: f64,
        ingredient_name: &str,
    ) -> (NutritionVector, bool) {
        if let Some(record) = record {
            return (scale_record(record, weight_in_grams), true);
        }

        if let Some(estimator) = &self.estimator {
            match tokio::time::timeout(
                self.estimator_timeout,
                estimator.estimate(ingredient_name, weight_in_grams),
            )
            .await
            {
                Ok(Ok(vector)) if vector.is_valid() => {
                    debug!(ingredient = ingredient_name, "Using estimator nutrition");
                    return (vector, false);
                }
                Ok(Ok(_)) => {
                    warn!(
                        ingredient = ingredient_name,
                        "Estimator returned an invalid vector; using keyword fallback"
                    );
                }
                Ok(Err(e)) => {
                    warn!(
                        ingredient = ingredient_name,
                        error = %e,
                        "Nutrition estimator failed; using keyword fallback"
                    );
                }
                Err(_) => {
                    warn!(
                        ingredient = ingredient_name,
                        "Nutrition estimator timed out; using keyword fallback"
                    );
                }
            }
        }

        (keyword_fallback(ingredient_name, weight_in_grams), false)
    }
}

/// Scale a per-100g record to the given weight
#[must_use]
pub fn scale_record(record: &NutritionRecord, weight_in_grams: f64) -> NutritionVector {
    let factor = weight_in_grams / 100.0;
    NutritionVector {
        calories: record.calories_per_100g * factor,
        protein: record.protein_per_100g * factor,
        carbs: record.carbs_per_100g * factor,
        fat: record.fat_per_100g * factor,
        fiber: record.fiber_per_100g * factor,
    }
}

/// Deterministic keyword-heuristic estimate for an unknown food
#[must_use]
pub fn keyword_fallback(ingredient_name: &str, weight_in_grams: f64) -> NutritionVector {
    let name = ingredient_name.to_lowercase();
    let per_100g = KEYWORD_PROFILES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| name.contains(kw)))
        .map_or(GENERIC_PROFILE, |(_, profile)| *profile);

    per_100g.scale(weight_in_grams / 100.0)
}
