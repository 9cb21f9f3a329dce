// ABOUTME: Prompt builders for the recipe, category and nutrition collaborators
// ABOUTME: Each prompt asks for a machine-parseable payload (JSON or a bare label)
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt construction for the generation collaborators.
//!
//! The prompts pin the response format tightly so the callers can extract a
//! JSON object (or a bare label) without free-text post-processing.

use crate::models::DishCategory;

/// Prompt for a typical recipe with household-measure quantities
#[must_use]
pub fn recipe_prompt(dish_name: &str) -> String {
    format!(
        "Create a typical recipe for Indian dish: \"{dish_name}\".\n\
         Return ONLY a JSON object with this exact structure:\n\
         {{\n\
           \"ingredients\": [\n\
             {{\"name\": \"ingredient name\", \"quantity\": \"approximate quantity\"}}\n\
           ]\n\
         }}\n\
         Include 5-10 main ingredients with quantities in common household \
         measurements (cups, tbsp, tsp, etc.)."
    )
}

/// Prompt for a single category label out of the fixed enumeration
#[must_use]
pub fn category_prompt(dish_name: &str) -> String {
    let categories = [
        DishCategory::WetSabzi,
        DishCategory::DrySabzi,
        DishCategory::Dal,
        DishCategory::NonVegCurry,
        DishCategory::RiceDish,
        DishCategory::RotiBread,
        DishCategory::SweetDessert,
    ]
    .iter()
    .map(|c| format!("- {}", c.as_str()))
    .collect::<Vec<_>>()
    .join("\n");

    format!(
        "Categorize the Indian dish \"{dish_name}\" into EXACTLY ONE of these categories:\n\
         {categories}\n\n\
         Return ONLY the category name, nothing else."
    )
}

/// Prompt for a nutrition estimate of a given weight of one ingredient
#[must_use]
pub fn nutrition_prompt(ingredient_name: &str, weight_in_grams: f64) -> String {
    format!(
        "Please estimate the nutritional values for {weight_in_grams}g of {ingredient_name}.\n\
         Provide ONLY a JSON with exact keys: calories, protein, carbs, fat, fiber.\n\
         Values should be numbers only (no units), with calories in kcal and others in grams.\n\
         Example: {{\"calories\": 150, \"protein\": 5, \"carbs\": 20, \"fat\": 3, \"fiber\": 2}}"
    )
}
