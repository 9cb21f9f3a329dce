// ABOUTME: Google Gemini client backing the recipe, category and nutrition collaborators
// ABOUTME: Single-attempt generateContent calls with JSON payload extraction from model text
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Gemini Collaborator Backend
//!
//! One client implements all three collaborator traits against the Generative
//! Language API `generateContent` endpoint. Each call is a single attempt;
//! the orchestrator applies the timeout and the deterministic fallback.
//!
//! Model responses are free text that should contain a JSON object (or a bare
//! category label). The JSON payload is extracted with a brace-matching
//! pattern and parsed leniently: missing or non-numeric nutrition fields
//! default to zero.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{prompts, CategoryClassifier, NutritionEstimator, RecipeGenerator};
use crate::errors::{AppError, AppResult};
use crate::models::{NutritionVector, Recipe};

/// Base URL for the Generative Language API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Matches the outermost JSON object embedded in model text
static JSON_PAYLOAD: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"\{[\s\S]*\}").unwrap()
});

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

/// Content block for the Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<ContentPart>,
}

/// Text part of a content block
#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

/// One response candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

/// Error payload returned by the API
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Gemini-backed collaborator client
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    /// Create a client for the given API key and model
    #[must_use]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: API_BASE_URL.to_owned(),
            client: Client::new(),
        }
    }

    /// Override the API base URL (test servers)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Send one prompt and return the concatenated candidate text
    async fn generate_text(&self, prompt: String) -> AppResult<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![ContentPart { text: prompt }],
            }],
        };

        debug!(model = %self.model, "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::external_service("Gemini API", e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::external_service("Gemini API", e.to_string()))?;

        if !status.is_success() {
            warn!(status = %status, "Gemini API error");
            return Err(AppError::external_service(
                "Gemini API",
                format!("HTTP {status}: {body}"),
            ));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::serialization(format!("Gemini response parse error: {e}")))?;

        if let Some(error) = parsed.error {
            return Err(AppError::external_service("Gemini API", error.message));
        }

        let text = parsed
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                AppError::external_service("Gemini API", "Response contained no text")
            })?;

        Ok(text)
    }
}

/// Extract the JSON object embedded in model text
fn extract_json(text: &str) -> AppResult<Value> {
    let payload = JSON_PAYLOAD
        .find(text)
        .ok_or_else(|| AppError::serialization("No JSON object in model response"))?;

    serde_json::from_str(payload.as_str())
        .map_err(|e| AppError::serialization(format!("Invalid JSON in model response: {e}")))
}

/// Read a numeric field leniently: numbers pass through, numeric strings are
/// parsed, anything else becomes zero
fn lenient_f64(value: &Value, key: &str) -> f64 {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[async_trait]
impl RecipeGenerator for GeminiClient {
    async fn generate(&self, dish_name: &str) -> AppResult<Recipe> {
        let text = self.generate_text(prompts::recipe_prompt(dish_name)).await?;
        let payload = extract_json(&text)?;

        let recipe: Recipe = serde_json::from_value(payload)
            .map_err(|e| AppError::serialization(format!("Could not parse recipe response: {e}")))?;

        if recipe.ingredients.is_empty() {
            return Err(AppError::serialization("Recipe response had no ingredients"));
        }

        debug!(
            dish = dish_name,
            ingredients = recipe.ingredients.len(),
            "Recipe generated"
        );
        Ok(recipe)
    }
}

#[async_trait]
impl CategoryClassifier for GeminiClient {
    async fn classify(&self, dish_name: &str, _recipe: &Recipe) -> AppResult<String> {
        let text = self
            .generate_text(prompts::category_prompt(dish_name))
            .await?;
        Ok(text.trim().to_owned())
    }
}

#[async_trait]
impl NutritionEstimator for GeminiClient {
    async fn estimate(
        &self,
        ingredient_name: &str,
        weight_in_grams: f64,
    ) -> AppResult<NutritionVector> {
        let text = self
            .generate_text(prompts::nutrition_prompt(ingredient_name, weight_in_grams))
            .await?;
        let payload = extract_json(&text)?;

        Ok(NutritionVector {
            calories: lenient_f64(&payload, "calories"),
            protein: lenient_f64(&payload, "protein"),
            carbs: lenient_f64(&payload, "carbs"),
            fat: lenient_f64(&payload, "fat"),
            fiber: lenient_f64(&payload, "fiber"),
        })
    }
}
