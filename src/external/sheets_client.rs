// ABOUTME: Google Sheets values-API client for reference table retrieval
// ABOUTME: Fetches header-keyed rows from the nutrition, unit and category sheets
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Google Sheets Client
//!
//! Read-only client for the Google Sheets values API, used to retrieve the
//! reference nutrition table, the unit table and the category table. The API
//! requires only an API key.
//!
//! The first row of each sheet is treated as the header row; every remaining
//! row is coerced into a `header -> cell` mapping, padded with empty strings
//! where the row is shorter than the header.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ReferenceDataSource, Row};
use crate::config::DEFAULT_SHEETS_BASE_URL;
use crate::errors::{AppError, AppResult};

/// Sheets client configuration
#[derive(Debug, Clone)]
pub struct SheetsClientConfig {
    /// Google API key
    pub api_key: String,
    /// Spreadsheet identifier
    pub spreadsheet_id: String,
    /// Base URL for the values API (overridable for tests)
    pub base_url: String,
}

impl Default for SheetsClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            spreadsheet_id: String::new(),
            base_url: DEFAULT_SHEETS_BASE_URL.to_owned(),
        }
    }
}

/// Sheets values API response
#[derive(Debug, Deserialize)]
struct ValuesResponse {
    /// Row-major cell values; absent when the sheet is empty
    values: Option<Vec<Vec<String>>>,
}

/// Read-only Google Sheets values-API client
pub struct SheetsClient {
    config: SheetsClientConfig,
    http_client: Client,
}

impl SheetsClient {
    /// Create a new Sheets client
    #[must_use]
    pub fn new(config: SheetsClientConfig) -> Self {
        Self {
            config,
            http_client: Client::new(),
        }
    }

    /// Fetch the raw cell grid for one sheet
    async fn fetch_values(&self, sheet_name: &str) -> AppResult<Vec<Vec<String>>> {
        let url = format!(
            "{}/{}/values/{}",
            self.config.base_url, self.config.spreadsheet_id, sheet_name
        );

        debug!(sheet = sheet_name, "Fetching reference sheet");

        let response = self
            .http_client
            .get(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::external_service("Sheets API", e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(sheet = sheet_name, status = %status, "Sheets API error");
            return Err(AppError::external_service(
                "Sheets API",
                format!("HTTP {status}: {body}"),
            ));
        }

        let values: ValuesResponse = response.json().await.map_err(|e| {
            AppError::external_service("Sheets API", format!("JSON parse error: {e}"))
        })?;

        values
            .values
            .filter(|rows| !rows.is_empty())
            .ok_or_else(|| {
                AppError::external_service("Sheets API", format!("No data found in {sheet_name}"))
            })
    }
}

#[async_trait]
impl ReferenceDataSource for SheetsClient {
    async fn fetch(&self, table_name: &str) -> AppResult<Vec<Row>> {
        let mut rows = self.fetch_values(table_name).await?;

        let headers = rows.remove(0);
        let mapped = rows
            .into_iter()
            .map(|row| coerce_row(&headers, row))
            .collect::<Vec<Row>>();

        debug!(sheet = table_name, rows = mapped.len(), "Sheet loaded");
        Ok(mapped)
    }
}

/// Zip one data row against the header row, padding missing cells
fn coerce_row(headers: &[String], row: Vec<String>) -> Row {
    let mut cells = row.into_iter();
    headers
        .iter()
        .map(|header| (header.clone(), cells.next().unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_owned()).collect()
    }

    #[test]
    fn coerce_row_keys_cells_by_header() {
        let row = coerce_row(
            &headers(&["food_name", "energy_kcal"]),
            vec!["paneer".to_owned(), "300".to_owned()],
        );
        assert_eq!(row["food_name"], "paneer");
        assert_eq!(row["energy_kcal"], "300");
    }

    #[test]
    fn coerce_row_pads_short_rows_with_empty_strings() {
        let row = coerce_row(
            &headers(&["food_name", "energy_kcal", "protein_g"]),
            vec!["rice".to_owned()],
        );
        assert_eq!(row["food_name"], "rice");
        assert_eq!(row["energy_kcal"], "");
        assert_eq!(row["protein_g"], "");
    }

    #[test]
    fn coerce_row_ignores_extra_cells() {
        let row = coerce_row(
            &headers(&["food_name"]),
            vec!["ghee".to_owned(), "stray".to_owned()],
        );
        assert_eq!(row.len(), 1);
        assert_eq!(row["food_name"], "ghee");
    }
}
