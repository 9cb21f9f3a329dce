// ABOUTME: Fans out per-ingredient processing and sums contributions into dish totals
// ABOUTME: Ingredient failures are absorbed locally; totals round once at the end
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Dish Aggregator
//!
//! Runs the leaf pipeline (parse -> weigh -> resolve -> compute) for every
//! ingredient concurrently and sums the contributions field-wise.
//! Concurrency is a throughput optimization only: results are identical
//! under sequential execution, and per-ingredient ordering is preserved in
//! the output.
//!
//! A failure in one ingredient never aborts the others: the offending
//! ingredient is logged, contributes zero nutrition and is flagged
//! `matched = false`. Totals are rounded to one decimal place once, at the
//! end, so rounding error does not compound.

use futures_util::future::join_all;
use tracing::{debug, warn};

use super::{ingredient_resolver, nutrition_calculator::NutritionCalculator, quantity_parser,
    weight_estimator};
use crate::models::{Ingredient, NutritionVector, ProcessedIngredient};
use crate::reference::ReferenceData;

/// Aggregated per-ingredient records and dish totals
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedDish {
    /// One record per input ingredient, in input order
    pub ingredients: Vec<ProcessedIngredient>,
    /// Field-wise totals, rounded to one decimal place
    pub totals: NutritionVector,
}

/// Orchestrates per-ingredient processing into dish totals
pub struct DishAggregator {
    calculator: NutritionCalculator,
}

impl DishAggregator {
    /// Create an aggregator around the given calculator
    #[must_use]
    pub fn new(calculator: NutritionCalculator) -> Self {
        Self { calculator }
    }

    /// Process all ingredients and sum their contributions
    pub async fn aggregate(
        &self,
        ingredients: &[Ingredient],
        reference: &ReferenceData,
    ) -> AggregatedDish {
        let processed = join_all(
            ingredients
                .iter()
                .map(|ingredient| self.process_ingredient(ingredient, reference)),
        )
        .await;

        let totals = processed
            .iter()
            .fold(NutritionVector::default(), |acc, p| acc + p.nutrition)
            .round_to_tenths();

        debug!(
            ingredients = processed.len(),
            calories = totals.calories,
            "Dish aggregated"
        );

        AggregatedDish {
            ingredients: processed,
            totals,
        }
    }

    /// Run the leaf pipeline for one ingredient
    ///
    /// Infallible by construction: every stage degrades to a documented
    /// default, and a non-finite contribution (e.g. from a zero-denominator
    /// fraction) is zeroed with a warning instead of poisoning the totals.
    async fn process_ingredient(
        &self,
        ingredient: &Ingredient,
        reference: &ReferenceData,
    ) -> ProcessedIngredient {
        let quantity = quantity_parser::parse(&ingredient.quantity);
        let estimate = weight_estimator::to_grams(
            &ingredient.name,
            &quantity,
            &reference.unit_multipliers,
        );

        let record = ingredient_resolver::resolve(&ingredient.name, &reference.nutrition);
        let (nutrition, matched) = self
            .calculator
            .compute(record, estimate.weight_in_grams, &ingredient.name)
            .await;

        let (nutrition, matched) = if nutrition.is_valid() {
            (nutrition, matched)
        } else {
            warn!(
                ingredient = %ingredient.name,
                quantity = %ingredient.quantity,
                "Ingredient produced an invalid contribution; counting zero nutrition"
            );
            (NutritionVector::default(), false)
        };

        ProcessedIngredient {
            name: ingredient.name.clone(),
            original_quantity: ingredient.quantity.clone(),
            standard_quantity: estimate.standard_quantity,
            weight_in_grams: estimate.weight_in_grams,
            nutrition,
            matched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutritionRecord;
    use std::time::Duration;

    fn reference_with(records: Vec<NutritionRecord>) -> ReferenceData {
        ReferenceData {
            nutrition: records,
            ..ReferenceData::default()
        }
    }

    fn record(food_name: &str, calories: f64, protein: f64) -> NutritionRecord {
        NutritionRecord {
            food_name: food_name.to_owned(),
            calories_per_100g: calories,
            protein_per_100g: protein,
            carbs_per_100g: 0.0,
            fat_per_100g: 0.0,
            fiber_per_100g: 0.0,
        }
    }

    fn aggregator() -> DishAggregator {
        DishAggregator::new(NutritionCalculator::new(None, Duration::from_secs(1)))
    }

    #[tokio::test]
    async fn totals_sum_field_wise_and_round_once() {
        let reference = reference_with(vec![
            record("paneer", 300.0, 20.0),
            record("butter", 717.0, 0.9),
        ]);
        let ingredients = vec![
            Ingredient {
                name: "paneer".to_owned(),
                quantity: "250g".to_owned(),
            },
            Ingredient {
                name: "butter".to_owned(),
                quantity: "2 tbsp".to_owned(),
            },
        ];

        let dish = aggregator().aggregate(&ingredients, &reference).await;

        // paneer: 250g -> 750 kcal / 50 g protein
        // butter: 30g -> 215.1 kcal / 0.27 g protein
        assert_eq!(dish.totals.calories, 965.1);
        assert_eq!(dish.totals.protein, 50.3);
        assert_eq!(dish.ingredients.len(), 2);
        assert!(dish.ingredients.iter().all(|p| p.matched));
    }

    #[tokio::test]
    async fn output_preserves_input_order() {
        let reference = reference_with(vec![record("rice", 350.0, 8.0)]);
        let ingredients = vec![
            Ingredient {
                name: "cumin".to_owned(),
                quantity: "1 tsp".to_owned(),
            },
            Ingredient {
                name: "rice".to_owned(),
                quantity: "1 cup".to_owned(),
            },
        ];

        let dish = aggregator().aggregate(&ingredients, &reference).await;

        assert_eq!(dish.ingredients[0].name, "cumin");
        assert_eq!(dish.ingredients[1].name, "rice");
    }

    #[tokio::test]
    async fn unmatched_ingredient_contributes_fallback_nutrition() {
        let reference = reference_with(vec![]);
        let ingredients = vec![Ingredient {
            name: "ghee".to_owned(),
            quantity: "1 tbsp".to_owned(),
        }];

        let dish = aggregator().aggregate(&ingredients, &reference).await;

        assert!(!dish.ingredients[0].matched);
        assert_eq!(dish.totals.calories, 135.0);
        assert!(dish.totals.calories >= 0.0);
    }

    #[tokio::test]
    async fn non_finite_contribution_is_zeroed_without_aborting_others() {
        let reference = reference_with(vec![
            record("rice", 350.0, 8.0),
            record("ghee", 900.0, 0.0),
        ]);
        let ingredients = vec![
            Ingredient {
                name: "rice".to_owned(),
                quantity: "1/0 cup".to_owned(),
            },
            Ingredient {
                name: "ghee".to_owned(),
                quantity: "10g".to_owned(),
            },
        ];

        let dish = aggregator().aggregate(&ingredients, &reference).await;

        assert_eq!(dish.ingredients[0].nutrition, NutritionVector::default());
        assert!(!dish.ingredients[0].matched);
        assert_eq!(dish.totals.calories, 90.0);
    }

    #[tokio::test]
    async fn empty_ingredient_list_yields_zero_totals() {
        let dish = aggregator()
            .aggregate(&[], &reference_with(vec![]))
            .await;
        assert_eq!(dish.totals, NutritionVector::default());
        assert!(dish.ingredients.is_empty());
    }
}
