// ABOUTME: Main library entry point for the thali dish nutrition estimator
// ABOUTME: Exposes the estimation pipeline, reference data layer and collaborator contracts
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # thali
//!
//! Estimates the nutritional profile of an Indian dish from a free-text
//! ingredient list, where quantities come in inconsistent household units
//! and ingredient names only approximately match the reference nutrition
//! table.
//!
//! ## Pipeline
//!
//! ingredient list -> quantity parsing -> weight estimation -> ingredient
//! resolution -> nutrition calculation -> dish aggregation -> serving
//! normalization.
//!
//! Every stage is deterministic and explainable: malformed quantities,
//! unknown units and unmatched foods all degrade to documented defaults
//! rather than failing. Outputs are estimates, not precision nutrition data.
//!
//! ## Collaborators
//!
//! Recipe generation, category classification and ad-hoc nutrition
//! estimation are external capabilities behind narrow traits (see
//! [`llm`]); each has a required deterministic local fallback, so the
//! pipeline completes even when no collaborator is configured.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use thali::estimator::DishEstimator;
//! use thali::external::ReferenceDataSource;
//! use thali::reference::ReferenceCache;
//!
//! # async fn example(source: Arc<dyn ReferenceDataSource>) -> thali::errors::AppResult<()> {
//! let cache = Arc::new(ReferenceCache::new(source));
//! let estimator = DishEstimator::new(cache);
//! let estimate = estimator.estimate("Dal Makhani").await?;
//! println!("{} kcal/serving", estimate.estimated_nutrition_per_serving.calories);
//! # Ok(())
//! # }
//! ```

/// Environment-driven configuration
pub mod config;

/// Unified error handling
pub mod errors;

/// Top-level dish estimation orchestration
pub mod estimator;

/// External reference data sources
pub mod external;

/// The deterministic estimation pipeline
pub mod intelligence;

/// Generation collaborator contracts and the Gemini backend
pub mod llm;

/// Logging configuration
pub mod logging;

/// Core data structures
pub mod models;

/// Reference table coercion and the process-wide cache
pub mod reference;
