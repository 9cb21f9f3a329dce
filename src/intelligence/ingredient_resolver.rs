// ABOUTME: Tiered fuzzy matching of ingredient names against the reference nutrition table
// ABOUTME: Exact, then substring, then token-level search with table-order tie-breaks
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Ingredient Resolver
//!
//! Three-tier deterministic search, case-insensitive, highest-priority tier
//! first; within a tier the first record in original table order wins:
//!
//! 1. **Exact**: food name equals the cleaned ingredient name
//! 2. **Substring**: food name contains the cleaned name
//! 3. **Token**: food name contains any whitespace token of the cleaned
//!    name that is at least 3 characters long
//!
//! This is a stable best-effort heuristic favoring coverage over precision;
//! "onion" matching "onion seeds" is an accepted trade-off. Do not replace
//! the substring checks with a similarity metric: that would change
//! observable results.

use crate::models::NutritionRecord;

/// Resolve an ingredient name against the reference table
///
/// Returns `None` when no tier produces a match. Repeated calls with the
/// same name and table always return the same record.
#[must_use]
pub fn resolve<'a>(name: &str, table: &'a [NutritionRecord]) -> Option<&'a NutritionRecord> {
    let clean = name.trim().to_lowercase();
    if clean.is_empty() {
        return None;
    }

    // Tier 1: exact
    if let Some(record) = table
        .iter()
        .find(|record| record.food_name.to_lowercase() == clean)
    {
        return Some(record);
    }

    // Tier 2: substring (food name contains the cleaned name)
    if let Some(record) = table
        .iter()
        .find(|record| record.food_name.to_lowercase().contains(&clean))
    {
        return Some(record);
    }

    // Tier 3: token-level, discarding tokens shorter than 3 characters
    let tokens: Vec<&str> = clean
        .split_whitespace()
        .filter(|token| token.len() >= 3)
        .collect();
    if tokens.is_empty() {
        return None;
    }

    table.iter().find(|record| {
        let food_name = record.food_name.to_lowercase();
        tokens.iter().any(|token| food_name.contains(token))
    })
}
