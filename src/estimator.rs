// ABOUTME: Top-level dish estimation orchestration with collaborator fallbacks
// ABOUTME: Loads reference data, obtains a recipe and category, aggregates and normalizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Dish Estimator
//!
//! The entry point of the pipeline. For a dish name it:
//!
//! 1. loads the reference tables (the one fatal failure point)
//! 2. asks the recipe collaborator for an ingredient list, substituting the
//!    static fallback recipe on failure
//! 3. asks the category classifier for a label, accepting it only when it
//!    exactly matches an enumerated category, otherwise inferring the
//!    category from keywords in the dish name
//! 4. aggregates per-ingredient nutrition and rescales to one serving
//!
//! Collaborator calls are single attempts under a timeout, made with no lock
//! held; every failure path completes the request from cached/static data.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::EstimatorConfig;
use crate::errors::{AppError, AppResult};
use crate::external::SheetsClient;
use crate::external::sheets_client::SheetsClientConfig;
use crate::intelligence::{serving_normalizer, DishAggregator, NutritionCalculator};
use crate::llm::{CategoryClassifier, GeminiClient, NutritionEstimator, RecipeGenerator};
use crate::models::{DishCategory, DishEstimate, Ingredient, IngredientSummary, Recipe};
use crate::reference::{ReferenceCache, ReferenceData};

/// Default per-call collaborator timeout
const DEFAULT_COLLABORATOR_TIMEOUT: Duration = Duration::from_secs(10);

/// Orchestrates the full estimation pipeline for a dish
pub struct DishEstimator {
    cache: Arc<ReferenceCache>,
    recipe_generator: Option<Arc<dyn RecipeGenerator>>,
    category_classifier: Option<Arc<dyn CategoryClassifier>>,
    nutrition_estimator: Option<Arc<dyn NutritionEstimator>>,
    collaborator_timeout: Duration,
}

impl DishEstimator {
    /// Create an estimator over the given reference cache, with no
    /// collaborators configured
    #[must_use]
    pub fn new(cache: Arc<ReferenceCache>) -> Self {
        Self {
            cache,
            recipe_generator: None,
            category_classifier: None,
            nutrition_estimator: None,
            collaborator_timeout: DEFAULT_COLLABORATOR_TIMEOUT,
        }
    }

    /// Build a production estimator from configuration: Sheets-backed
    /// reference data, Gemini-backed collaborators when a key is present
    #[must_use]
    pub fn from_config(config: &EstimatorConfig) -> Self {
        let sheets = SheetsClient::new(SheetsClientConfig {
            api_key: config.google_api_key.clone(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            base_url: config.sheets_base_url.clone(),
        });
        let cache = Arc::new(ReferenceCache::new(Arc::new(sheets)));

        let mut estimator = Self::new(cache)
            .with_collaborator_timeout(Duration::from_secs(config.llm_timeout_secs));

        if let Some(api_key) = &config.gemini_api_key {
            let client = Arc::new(GeminiClient::new(api_key.clone(), config.llm_model.clone()));
            estimator = estimator
                .with_recipe_generator(client.clone())
                .with_category_classifier(client.clone())
                .with_nutrition_estimator(client);
        }

        estimator
    }

    /// Set the recipe collaborator
    #[must_use]
    pub fn with_recipe_generator(mut self, generator: Arc<dyn RecipeGenerator>) -> Self {
        self.recipe_generator = Some(generator);
        self
    }

    /// Set the category collaborator
    #[must_use]
    pub fn with_category_classifier(mut self, classifier: Arc<dyn CategoryClassifier>) -> Self {
        self.category_classifier = Some(classifier);
        self
    }

    /// Set the nutrition collaborator consulted for unknown foods
    #[must_use]
    pub fn with_nutrition_estimator(mut self, estimator: Arc<dyn NutritionEstimator>) -> Self {
        self.nutrition_estimator = Some(estimator);
        self
    }

    /// Set the per-call collaborator timeout
    #[must_use]
    pub const fn with_collaborator_timeout(mut self, timeout: Duration) -> Self {
        self.collaborator_timeout = timeout;
        self
    }

    /// Estimate per-serving nutrition for the named dish
    ///
    /// # Errors
    ///
    /// Fails only on invalid input or when the reference tables cannot be
    /// loaded; collaborator failures are absorbed by deterministic
    /// fallbacks.
    pub async fn estimate(&self, dish_name: &str) -> AppResult<DishEstimate> {
        let dish_name = dish_name.trim();
        if dish_name.is_empty() {
            return Err(AppError::invalid_input("Dish name cannot be empty"));
        }

        info!(dish = dish_name, "Estimating nutrition");

        let reference = self.cache.get_or_load().await?;

        let recipe = self.obtain_recipe(dish_name).await;
        let category = self.obtain_category(dish_name, &recipe, &reference).await;

        let calculator =
            NutritionCalculator::new(self.nutrition_estimator.clone(), self.collaborator_timeout);
        let aggregator = DishAggregator::new(calculator);
        let dish = aggregator.aggregate(&recipe.ingredients, &reference).await;

        let per_serving = serving_normalizer::normalize(&dish.totals, category);

        let ingredients_used = dish
            .ingredients
            .iter()
            .map(|p| IngredientSummary {
                ingredient: p.name.clone(),
                quantity: p.original_quantity.clone(),
                weight_grams: whole_grams(p.weight_in_grams),
            })
            .collect();

        Ok(DishEstimate {
            dish_name: dish_name.to_owned(),
            dish_type: category.as_str().to_owned(),
            estimated_nutrition_per_serving: per_serving,
            ingredients_used,
            generated_at: Utc::now(),
        })
    }

    /// Recipe from the collaborator, or the static fallback
    async fn obtain_recipe(&self, dish_name: &str) -> Recipe {
        if let Some(generator) = &self.recipe_generator {
            match self
                .with_timeout(generator.generate(dish_name), "recipe generation")
                .await
            {
                Ok(recipe) => {
                    debug!(dish = dish_name, "Using generated recipe");
                    return recipe;
                }
                Err(e) => {
                    warn!(dish = dish_name, error = %e, "Recipe generation failed; using fallback recipe");
                }
            }
        }
        fallback_recipe(dish_name)
    }

    /// Category from the classifier when its label is exactly one of the
    /// enumerated categories (and, when the category table is populated,
    /// present there too); keyword inference otherwise
    async fn obtain_category(
        &self,
        dish_name: &str,
        recipe: &Recipe,
        reference: &ReferenceData,
    ) -> DishCategory {
        if let Some(classifier) = &self.category_classifier {
            match self
                .with_timeout(classifier.classify(dish_name, recipe), "category classification")
                .await
            {
                Ok(label) => {
                    let known_in_table = reference.category_labels.is_empty()
                        || reference.category_labels.iter().any(|l| l == label.trim());
                    if let Some(category) =
                        DishCategory::from_label(&label).filter(|_| known_in_table)
                    {
                        debug!(dish = dish_name, category = category.as_str(), "Using classifier category");
                        return category;
                    }
                    warn!(
                        dish = dish_name,
                        label,
                        "Classifier label outside the category enumeration; inferring from name"
                    );
                }
                Err(e) => {
                    warn!(dish = dish_name, error = %e, "Category classification failed; inferring from name");
                }
            }
        }
        DishCategory::infer_from_name(dish_name)
    }

    /// Run one collaborator call under the configured timeout
    async fn with_timeout<T>(
        &self,
        fut: impl Future<Output = AppResult<T>> + Send,
        what: &str,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.collaborator_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(AppError::external_service(what, "timed out")),
        }
    }
}

/// Round a weight to whole grams for the estimate summary
fn whole_grams(weight: f64) -> u32 {
    if weight.is_finite() && weight >= 0.0 {
        weight.round() as u32
    } else {
        0
    }
}

/// Static fallback recipe for when the recipe collaborator is unavailable
///
/// A small table of known dishes plus a generic five-ingredient template.
#[must_use]
pub fn fallback_recipe(dish_name: &str) -> Recipe {
    let ingredient = |name: &str, quantity: &str| Ingredient {
        name: name.to_owned(),
        quantity: quantity.to_owned(),
    };

    match dish_name.to_lowercase().as_str() {
        "paneer butter masala" => Recipe {
            ingredients: vec![
                ingredient("paneer", "250g"),
                ingredient("butter", "2 tbsp"),
                ingredient("tomato", "3 medium"),
                ingredient("onion", "1 large"),
                ingredient("cream", "2 tbsp"),
                ingredient("garam masala", "1 tsp"),
            ],
        },
        "dal makhani" => Recipe {
            ingredients: vec![
                ingredient("black urad dal", "1 cup"),
                ingredient("rajma", "1/4 cup"),
                ingredient("butter", "2 tbsp"),
                ingredient("tomato", "2 medium"),
                ingredient("cream", "1 tbsp"),
            ],
        },
        "chicken curry" => Recipe {
            ingredients: vec![
                ingredient("chicken", "500g"),
                ingredient("onion", "2 medium"),
                ingredient("tomato", "2 medium"),
                ingredient("oil", "2 tbsp"),
                ingredient("garam masala", "1 tsp"),
            ],
        },
        _ => Recipe {
            ingredients: vec![
                ingredient("main ingredient", "250g"),
                ingredient("onion", "1 medium"),
                ingredient("tomato", "2 medium"),
                ingredient("oil", "2 tbsp"),
                ingredient("spices", "2 tsp"),
            ],
        },
    }
}
