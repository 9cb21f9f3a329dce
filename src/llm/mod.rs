// ABOUTME: Collaborator contracts for AI-assisted recipe, category and nutrition generation
// ABOUTME: Narrow single-method async traits with required deterministic fallbacks in callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Generation Collaborators
//!
//! The deterministic core consumes three narrow capability interfaces, each
//! of which may be backed by a remote text-generation service, a static
//! lookup, or a test stub:
//!
//! - [`RecipeGenerator`]: candidate ingredient list for a dish name
//! - [`CategoryClassifier`]: category label for a dish
//! - [`NutritionEstimator`]: ad-hoc nutrition estimate for an unknown food
//!
//! Every collaborator is best-effort. Callers make exactly one attempt and
//! then run a deterministic local fallback; collaborator failures never
//! propagate past the orchestrator.

/// Gemini-backed implementation of all three collaborators
pub mod gemini;
/// Prompt builders for the generation collaborators
pub mod prompts;

pub use gemini::GeminiClient;

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::{NutritionVector, Recipe};

/// Produces a candidate recipe (ingredient list) for a dish name
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Generate a typical recipe for the named dish
    ///
    /// # Errors
    ///
    /// Returns an error when the backend fails or returns an unusable
    /// payload; the caller substitutes the static fallback recipe.
    async fn generate(&self, dish_name: &str) -> AppResult<Recipe>;
}

/// Produces a category label for a dish
#[async_trait]
pub trait CategoryClassifier: Send + Sync {
    /// Classify the named dish given its recipe
    ///
    /// Returns the raw label text; the caller accepts it only when it
    /// exactly matches an enumerated category.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend fails; the caller substitutes
    /// keyword-based inference over the dish name.
    async fn classify(&self, dish_name: &str, recipe: &Recipe) -> AppResult<String>;
}

/// Produces an ad-hoc nutrition estimate for a food absent from the
/// reference table
#[async_trait]
pub trait NutritionEstimator: Send + Sync {
    /// Estimate nutrition for the given weight of the named ingredient
    ///
    /// # Errors
    ///
    /// Returns an error when the backend fails or produces an invalid
    /// vector; the caller substitutes the keyword-heuristic fallback.
    async fn estimate(&self, ingredient_name: &str, weight_in_grams: f64)
        -> AppResult<NutritionVector>;
}
