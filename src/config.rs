// ABOUTME: Environment-driven configuration for reference data and LLM collaborators
// ABOUTME: Reads API keys, spreadsheet id, model selection and timeouts with sensible defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Configuration
//!
//! Environment-only configuration, loaded once at startup. The reference
//! tables live in a Google Sheets spreadsheet; the collaborators are backed
//! by the Gemini API when a key is present and fall back to deterministic
//! local behavior otherwise.

use crate::errors::{AppError, AppResult};
use std::env;
use tracing::{info, warn};

/// Default Gemini model for recipe/category/nutrition generation
pub const DEFAULT_LLM_MODEL: &str = "gemini-2.0-flash";

/// Default timeout for a single collaborator call, in seconds
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 10;

/// Default base URL for the Google Sheets values API
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Runtime configuration for the estimator
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// API key for the Google Sheets values API
    pub google_api_key: String,
    /// Spreadsheet holding the nutrition, unit and category tables
    pub spreadsheet_id: String,
    /// Base URL for the Sheets values API (overridable for tests)
    pub sheets_base_url: String,
    /// Gemini API key; collaborators are disabled when absent
    pub gemini_api_key: Option<String>,
    /// Model used for all three collaborator prompts
    pub llm_model: String,
    /// Per-call collaborator timeout in seconds
    pub llm_timeout_secs: u64,
}

impl EstimatorConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `GOOGLE_API_KEY`, `SPREADSHEET_ID`, `GEMINI_API_KEY` (optional),
    /// `THALI_LLM_MODEL`, `THALI_LLM_TIMEOUT_SECS` and
    /// `THALI_SHEETS_BASE_URL`. A `.env` file is honored when present.
    ///
    /// # Errors
    ///
    /// Returns a config error when a required variable is missing or a
    /// numeric variable fails to parse.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {e}");
        }

        let google_api_key = require_var("GOOGLE_API_KEY")?;
        let spreadsheet_id = require_var("SPREADSHEET_ID")?;

        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
        if gemini_api_key.is_none() {
            warn!("GEMINI_API_KEY not set; collaborators will use local fallbacks only");
        }

        let llm_timeout_secs = env_var_or("THALI_LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?;

        Ok(Self {
            google_api_key,
            spreadsheet_id,
            sheets_base_url: env::var("THALI_SHEETS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_SHEETS_BASE_URL.to_owned()),
            gemini_api_key,
            llm_model: env::var("THALI_LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_owned()),
            llm_timeout_secs,
        })
    }
}

/// Read a required environment variable
fn require_var(key: &str) -> AppResult<String> {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::config(format!("{key} environment variable is required")))
}

/// Read an optional numeric environment variable with a default
fn env_var_or(key: &str, default: u64) -> AppResult<u64> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}
