// ABOUTME: External data source integrations for reference table retrieval
// ABOUTME: Defines the ReferenceDataSource contract and the Google Sheets implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # External Data Sources
//!
//! The reference nutrition, unit and category tables live in an external
//! tabular source. This module defines the narrow contract the core consumes
//! ([`ReferenceDataSource`]) and the production Google Sheets client.
//!
//! Tests implement the trait over in-memory fixtures; the core never knows
//! which backend produced the rows.

/// Google Sheets values-API client
pub mod sheets_client;

pub use sheets_client::{SheetsClient, SheetsClientConfig};

use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::AppResult;

/// One table row, keyed by the table's header names
pub type Row = HashMap<String, String>;

/// A source of reference tables
///
/// Returns each table as one mapping per row keyed by header name. A missing
/// or unreachable source is the one fatal error class in the system: callers
/// surface it to the top-level boundary instead of falling back.
#[async_trait]
pub trait ReferenceDataSource: Send + Sync {
    /// Fetch all rows of the named table
    ///
    /// # Errors
    ///
    /// Returns an error when the table cannot be retrieved or is empty.
    async fn fetch(&self, table_name: &str) -> AppResult<Vec<Row>>;
}
