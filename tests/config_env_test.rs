// ABOUTME: Environment configuration tests for required, optional and numeric variables
// ABOUTME: Serialized because they mutate process-wide environment state
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use serial_test::serial;
use std::env;
use thali::config::{
    EstimatorConfig, DEFAULT_LLM_MODEL, DEFAULT_LLM_TIMEOUT_SECS, DEFAULT_SHEETS_BASE_URL,
};
use thali::errors::ErrorCode;

fn clear_env() {
    for key in [
        "GOOGLE_API_KEY",
        "SPREADSHEET_ID",
        "GEMINI_API_KEY",
        "THALI_LLM_MODEL",
        "THALI_LLM_TIMEOUT_SECS",
        "THALI_SHEETS_BASE_URL",
    ] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn missing_required_variable_is_a_config_error() {
    clear_env();
    env::set_var("SPREADSHEET_ID", "sheet-123");

    let error = EstimatorConfig::from_env().unwrap_err();

    assert_eq!(error.code, ErrorCode::ConfigError);
    assert!(error.message.contains("GOOGLE_API_KEY"));
}

#[test]
#[serial]
fn minimal_environment_uses_defaults() {
    clear_env();
    env::set_var("GOOGLE_API_KEY", "key-abc");
    env::set_var("SPREADSHEET_ID", "sheet-123");

    let config = EstimatorConfig::from_env().unwrap();

    assert_eq!(config.google_api_key, "key-abc");
    assert_eq!(config.spreadsheet_id, "sheet-123");
    assert_eq!(config.gemini_api_key, None);
    assert_eq!(config.llm_model, DEFAULT_LLM_MODEL);
    assert_eq!(config.llm_timeout_secs, DEFAULT_LLM_TIMEOUT_SECS);
    assert_eq!(config.sheets_base_url, DEFAULT_SHEETS_BASE_URL);
}

#[test]
#[serial]
fn overrides_are_honored() {
    clear_env();
    env::set_var("GOOGLE_API_KEY", "key-abc");
    env::set_var("SPREADSHEET_ID", "sheet-123");
    env::set_var("GEMINI_API_KEY", "gem-456");
    env::set_var("THALI_LLM_MODEL", "gemini-1.5-pro");
    env::set_var("THALI_LLM_TIMEOUT_SECS", "25");
    env::set_var("THALI_SHEETS_BASE_URL", "http://localhost:9100/v4/spreadsheets");

    let config = EstimatorConfig::from_env().unwrap();

    assert_eq!(config.gemini_api_key.as_deref(), Some("gem-456"));
    assert_eq!(config.llm_model, "gemini-1.5-pro");
    assert_eq!(config.llm_timeout_secs, 25);
    assert_eq!(config.sheets_base_url, "http://localhost:9100/v4/spreadsheets");
}

#[test]
#[serial]
fn non_numeric_timeout_is_a_config_error() {
    clear_env();
    env::set_var("GOOGLE_API_KEY", "key-abc");
    env::set_var("SPREADSHEET_ID", "sheet-123");
    env::set_var("THALI_LLM_TIMEOUT_SECS", "soon");

    let error = EstimatorConfig::from_env().unwrap_err();

    assert_eq!(error.code, ErrorCode::ConfigError);
    assert!(error.message.contains("THALI_LLM_TIMEOUT_SECS"));
}

#[test]
#[serial]
fn empty_gemini_key_counts_as_absent() {
    clear_env();
    env::set_var("GOOGLE_API_KEY", "key-abc");
    env::set_var("SPREADSHEET_ID", "sheet-123");
    env::set_var("GEMINI_API_KEY", "");

    let config = EstimatorConfig::from_env().unwrap();

    assert_eq!(config.gemini_api_key, None);
}
