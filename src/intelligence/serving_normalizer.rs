// ABOUTME: Rescales dish totals to a single serving using category-specific assumptions
// ABOUTME: Fixed (serving size, total cooked weight) table with integer rounding per field
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Serving Normalizer
//!
//! Each dish category carries a standard serving size and an assumed total
//! cooked weight; per-serving values are the dish totals scaled by
//! `serving / total` and rounded to whole numbers per field. The total
//! cooked weight is always positive, so the scale factor is too.

use crate::models::{DishCategory, NutritionVector};

/// (serving size, total cooked weight) in grams for a category
#[must_use]
pub const fn serving_profile(category: DishCategory) -> (f64, f64) {
    match category {
        DishCategory::WetSabzi | DishCategory::NonVegCurry => (180.0, 800.0),
        DishCategory::DrySabzi => (100.0, 600.0),
        DishCategory::RiceDish => (150.0, 800.0),
        DishCategory::RotiBread => (30.0, 300.0),
        DishCategory::SweetDessert => (75.0, 500.0),
        DishCategory::Dal | DishCategory::Unknown => (150.0, 700.0),
    }
}

/// Rescale dish totals to one standard serving
#[must_use]
pub fn normalize(totals: &NutritionVector, category: DishCategory) -> NutritionVector {
    let (serving_grams, total_grams) = serving_profile(category);
    totals.scale(serving_grams / total_grams).round_whole()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_positive_scale_factor() {
        for category in [
            DishCategory::WetSabzi,
            DishCategory::DrySabzi,
            DishCategory::Dal,
            DishCategory::NonVegCurry,
            DishCategory::RiceDish,
            DishCategory::RotiBread,
            DishCategory::SweetDessert,
            DishCategory::Unknown,
        ] {
            let (serving, total) = serving_profile(category);
            assert!(serving > 0.0);
            assert!(total > 0.0);
            assert!(serving / total > 0.0);
        }
    }

    #[test]
    fn roti_scales_by_one_tenth() {
        let totals = NutritionVector::new(1000.0, 40.0, 180.0, 20.0, 12.0);
        let per_serving = normalize(&totals, DishCategory::RotiBread);

        assert_eq!(per_serving.calories, 100.0);
        assert_eq!(per_serving.protein, 4.0);
        assert_eq!(per_serving.carbs, 18.0);
        assert_eq!(per_serving.fat, 2.0);
        assert_eq!(per_serving.fiber, 1.0);
    }

    #[test]
    fn fields_round_to_whole_numbers() {
        let totals = NutritionVector::new(1000.0, 10.0, 10.0, 10.0, 10.0);
        // Wet Sabzi scales by 180/800 = 0.225
        let per_serving = normalize(&totals, DishCategory::WetSabzi);

        assert_eq!(per_serving.calories, 225.0);
        assert_eq!(per_serving.protein, 2.0);
    }

    #[test]
    fn unknown_category_uses_the_default_profile() {
        assert_eq!(serving_profile(DishCategory::Unknown), (150.0, 700.0));
        let totals = NutritionVector::new(700.0, 0.0, 0.0, 0.0, 0.0);
        let per_serving = normalize(&totals, DishCategory::Unknown);
        assert_eq!(per_serving.calories, 150.0);
    }
}
