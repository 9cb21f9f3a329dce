// ABOUTME: Reference table loading, boundary coercion and the process-wide read-only cache
// ABOUTME: Guarded one-time initialization of nutrition, unit and category tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Reference Data
//!
//! The pipeline consumes three reference tables: the nutrition table (per-100g
//! values keyed by food name), the unit table (extra unit-to-grams
//! multipliers) and the category table (valid category labels).
//!
//! Rows arrive as loosely-typed header-keyed mappings and are coerced here
//! into fixed shapes with explicit numeric parsing and zero-defaulting. The
//! coerced tables are loaded exactly once per process: the first caller
//! performs the load while concurrent callers block on the same
//! initialization, and the result is read-only thereafter. Re-initialization
//! requires an explicit [`ReferenceCache::reset`].

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};
use crate::external::{ReferenceDataSource, Row};
use crate::models::NutritionRecord;

/// Sheet holding per-100g nutrition values
pub const NUTRITION_TABLE: &str = "Nutrition source";

/// Sheet holding extra unit-to-grams multipliers
pub const UNIT_TABLE: &str = "Unit of measurements";

/// Sheet holding the valid category labels
pub const CATEGORY_TABLE: &str = "Food categories";

/// Coerced, read-only reference tables
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    /// Nutrition records in original table order (the resolver tie-break)
    pub nutrition: Vec<NutritionRecord>,
    /// Extra unit-to-grams multipliers from the unit table, lower-cased
    pub unit_multipliers: HashMap<String, f64>,
    /// Valid category labels from the category table
    pub category_labels: Vec<String>,
}

impl ReferenceData {
    /// Coerce raw table rows into the fixed reference shape
    #[must_use]
    pub fn from_rows(
        nutrition_rows: &[Row],
        unit_rows: &[Row],
        category_rows: &[Row],
    ) -> Self {
        let nutrition = nutrition_rows
            .iter()
            .filter_map(coerce_nutrition_record)
            .collect::<Vec<_>>();

        let unit_multipliers = unit_rows
            .iter()
            .filter_map(coerce_unit_multiplier)
            .collect::<HashMap<_, _>>();

        let category_labels = category_rows
            .iter()
            .filter_map(|row| {
                let label = cell(row, "Food_category_name");
                (!label.is_empty()).then_some(label)
            })
            .collect::<Vec<_>>();

        debug!(
            nutrition = nutrition.len(),
            units = unit_multipliers.len(),
            categories = category_labels.len(),
            "Reference tables coerced"
        );

        Self {
            nutrition,
            unit_multipliers,
            category_labels,
        }
    }
}

/// Fetch a named cell, trimmed; missing cells become the empty string
fn cell(row: &Row, header: &str) -> String {
    row.get(header).map(|v| v.trim().to_owned()).unwrap_or_default()
}

/// Parse a numeric cell, defaulting to 0 on anything unparseable
///
/// Negative values are clamped to 0: per-100g nutrition is non-negative by
/// invariant, enforced here at the boundary.
fn numeric_cell(row: &Row, header: &str) -> f64 {
    row.get(header)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
        .max(0.0)
}

/// Coerce one nutrition row; rows without a food name are dropped
fn coerce_nutrition_record(row: &Row) -> Option<NutritionRecord> {
    let food_name = cell(row, "food_name");
    if food_name.is_empty() {
        return None;
    }

    Some(NutritionRecord {
        food_name,
        calories_per_100g: numeric_cell(row, "energy_kcal"),
        protein_per_100g: numeric_cell(row, "protein_g"),
        carbs_per_100g: numeric_cell(row, "carb_g"),
        fat_per_100g: numeric_cell(row, "fat_g"),
        fiber_per_100g: numeric_cell(row, "fibre_g"),
    })
}

/// Coerce one unit row into a (unit, grams) multiplier
///
/// Rows without a usable name or a positive grams value are skipped; the
/// built-in conversion constants always take precedence over these entries.
fn coerce_unit_multiplier(row: &Row) -> Option<(String, f64)> {
    let unit = cell(row, "unit_name").to_lowercase();
    if unit.is_empty() {
        return None;
    }

    let grams = numeric_cell(row, "grams_per_unit");
    if grams <= 0.0 {
        warn!(unit, "Skipping unit row without a positive grams value");
        return None;
    }

    Some((unit, grams))
}

/// Process-wide reference table cache with guarded lazy initialization
///
/// The first caller of [`get_or_load`](Self::get_or_load) performs the load;
/// concurrent callers during initialization block on the same future and
/// never trigger duplicate loads or observe a partially populated cache.
pub struct ReferenceCache {
    source: Arc<dyn ReferenceDataSource>,
    cell: OnceCell<Arc<ReferenceData>>,
}

impl ReferenceCache {
    /// Create a cache backed by the given data source
    #[must_use]
    pub fn new(source: Arc<dyn ReferenceDataSource>) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    /// Get the loaded reference data, loading it on first use
    ///
    /// # Errors
    ///
    /// Returns a fatal load error when any of the three tables cannot be
    /// retrieved. A failed load leaves the cache empty so a later call can
    /// retry.
    pub async fn get_or_load(&self) -> AppResult<Arc<ReferenceData>> {
        self.cell
            .get_or_try_init(|| async {
                let data = load_tables(self.source.as_ref()).await?;
                info!(
                    nutrition_records = data.nutrition.len(),
                    "Reference data loaded"
                );
                Ok(Arc::new(data))
            })
            .await
            .cloned()
    }

    /// Discard the cached tables so the next call reloads them
    ///
    /// Requires exclusive access: the cache is otherwise read-only for the
    /// process lifetime.
    pub fn reset(&mut self) {
        self.cell = OnceCell::new();
    }
}

/// Fetch and coerce all three reference tables
async fn load_tables(source: &dyn ReferenceDataSource) -> AppResult<ReferenceData> {
    let nutrition_rows = fetch_table(source, NUTRITION_TABLE).await?;
    let unit_rows = fetch_table(source, UNIT_TABLE).await?;
    let category_rows = fetch_table(source, CATEGORY_TABLE).await?;

    Ok(ReferenceData::from_rows(
        &nutrition_rows,
        &unit_rows,
        &category_rows,
    ))
}

/// Fetch one table, wrapping failures into the fatal load error class
async fn fetch_table(source: &dyn ReferenceDataSource, table: &str) -> AppResult<Vec<Row>> {
    source.fetch(table).await.map_err(|e| {
        AppError::resource_unavailable(format!("Failed to load required data: {table}"))
            .with_source(e)
    })
}
