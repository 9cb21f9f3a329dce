// ABOUTME: Shared fixtures for integration tests
// ABOUTME: In-memory reference data source and stub collaborator implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code)] // each integration test binary uses a subset of these helpers
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use thali::errors::{AppError, AppResult};
use thali::external::{ReferenceDataSource, Row};
use thali::models::{Ingredient, NutritionVector, Recipe};
use thali::reference::{CATEGORY_TABLE, NUTRITION_TABLE, UNIT_TABLE};

/// Build one header-keyed row
pub fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

/// Build one nutrition table row
pub fn nutrition_row(
    food_name: &str,
    kcal: &str,
    protein: &str,
    carb: &str,
    fat: &str,
    fibre: &str,
) -> Row {
    row(&[
        ("food_name", food_name),
        ("energy_kcal", kcal),
        ("protein_g", protein),
        ("carb_g", carb),
        ("fat_g", fat),
        ("fibre_g", fibre),
    ])
}

/// In-memory reference data source with a fetch counter
pub struct FixtureSource {
    tables: HashMap<String, Vec<Row>>,
    fetch_count: Arc<AtomicUsize>,
    fail: bool,
}

impl FixtureSource {
    /// Source serving the given three tables
    pub fn new(nutrition: Vec<Row>, units: Vec<Row>, categories: Vec<Row>) -> Self {
        let mut tables = HashMap::new();
        tables.insert(NUTRITION_TABLE.to_owned(), nutrition);
        tables.insert(UNIT_TABLE.to_owned(), units);
        tables.insert(CATEGORY_TABLE.to_owned(), categories);
        Self {
            tables,
            fetch_count: Arc::new(AtomicUsize::new(0)),
            fail: false,
        }
    }

    /// A small but realistic set of reference tables
    pub fn with_default_tables() -> Self {
        let nutrition = vec![
            nutrition_row("paneer", "300", "20", "5", "25", "0"),
            nutrition_row("butter", "717", "0.9", "0.1", "81", "0"),
            nutrition_row("onion", "40", "1.1", "9", "0.1", "1.7"),
            nutrition_row("tomato", "18", "0.9", "3.9", "0.2", "1.2"),
            nutrition_row("chicken", "200", "25", "0", "10", "0"),
            nutrition_row("urad dal", "341", "25", "59", "1.6", "18"),
            nutrition_row("cream", "340", "2", "3", "36", "0"),
        ];
        let units = vec![row(&[("unit_name", "katori"), ("grams_per_unit", "120")])];
        let categories = vec![
            row(&[("Food_category_name", "Wet Sabzi")]),
            row(&[("Food_category_name", "Dry Sabzi")]),
            row(&[("Food_category_name", "Dal")]),
            row(&[("Food_category_name", "Non-Veg Curry")]),
            row(&[("Food_category_name", "Rice Dish")]),
            row(&[("Food_category_name", "Roti/Bread")]),
            row(&[("Food_category_name", "Sweet/Dessert")]),
        ];
        Self::new(nutrition, units, categories)
    }

    /// Source that fails every fetch
    pub fn failing() -> Self {
        let mut source = Self::new(vec![], vec![], vec![]);
        source.fail = true;
        source
    }

    /// Handle to the fetch counter
    pub fn fetch_counter(&self) -> Arc<AtomicUsize> {
        self.fetch_count.clone()
    }
}

#[async_trait]
impl ReferenceDataSource for FixtureSource {
    async fn fetch(&self, table_name: &str) -> AppResult<Vec<Row>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::external_service("fixture", "unreachable"));
        }
        self.tables
            .get(table_name)
            .cloned()
            .ok_or_else(|| AppError::not_found(table_name.to_owned()))
    }
}

/// Recipe collaborator returning a fixed recipe
pub struct StubRecipeGenerator {
    pub recipe: Recipe,
}

impl StubRecipeGenerator {
    pub fn returning(ingredients: Vec<(&str, &str)>) -> Self {
        Self {
            recipe: Recipe {
                ingredients: ingredients
                    .into_iter()
                    .map(|(name, quantity)| Ingredient {
                        name: name.to_owned(),
                        quantity: quantity.to_owned(),
                    })
                    .collect(),
            },
        }
    }
}

#[async_trait]
impl thali::llm::RecipeGenerator for StubRecipeGenerator {
    async fn generate(&self, _dish_name: &str) -> AppResult<Recipe> {
        Ok(self.recipe.clone())
    }
}

/// Recipe collaborator that always fails
pub struct FailingRecipeGenerator;

#[async_trait]
impl thali::llm::RecipeGenerator for FailingRecipeGenerator {
    async fn generate(&self, _dish_name: &str) -> AppResult<Recipe> {
        Err(AppError::external_service("stub", "recipe backend down"))
    }
}

/// Recipe collaborator that never completes within a sensible timeout
pub struct HangingRecipeGenerator;

#[async_trait]
impl thali::llm::RecipeGenerator for HangingRecipeGenerator {
    async fn generate(&self, _dish_name: &str) -> AppResult<Recipe> {
        tokio::time::sleep(std::time::Duration::from_secs(600)).await;
        Err(AppError::internal("unreachable"))
    }
}

/// Category collaborator returning a fixed label
pub struct StubClassifier {
    pub label: String,
}

impl StubClassifier {
    pub fn returning(label: &str) -> Self {
        Self {
            label: label.to_owned(),
        }
    }
}

#[async_trait]
impl thali::llm::CategoryClassifier for StubClassifier {
    async fn classify(&self, _dish_name: &str, _recipe: &Recipe) -> AppResult<String> {
        Ok(self.label.clone())
    }
}

/// Nutrition collaborator returning a fixed vector
pub struct StubNutritionEstimator {
    pub vector: NutritionVector,
}

#[async_trait]
impl thali::llm::NutritionEstimator for StubNutritionEstimator {
    async fn estimate(&self, _name: &str, _weight: f64) -> AppResult<NutritionVector> {
        Ok(self.vector)
    }
}
