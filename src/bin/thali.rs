// ABOUTME: Command-line interface for the thali dish nutrition estimator
// ABOUTME: Prints a per-serving estimate as JSON, or the error shape on fatal failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # thali CLI
//!
//! Estimate per-serving nutrition for a named dish:
//!
//! ```text
//! thali "Paneer Butter Masala"
//! ```
//!
//! The estimate is printed to stdout as JSON. Unrecoverable failures
//! (unreachable reference data) print an `{error, message}` object instead
//! and exit non-zero.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use thali::{
    config::EstimatorConfig,
    errors::ErrorResponse,
    estimator::DishEstimator,
    logging,
};
use tracing::error;

#[derive(Parser)]
#[command(name = "thali")]
#[command(about = "Estimate per-serving nutrition for an Indian dish")]
struct Args {
    /// Dish name, e.g. "Dal Makhani"
    dish_name: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Skip the generation collaborators and use local fallbacks only
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = EstimatorConfig::from_env()?;
    if args.offline {
        config.gemini_api_key = None;
    }

    let estimator = DishEstimator::from_config(&config);

    match estimator.estimate(&args.dish_name).await {
        Ok(estimate) => {
            println!("{}", render(&estimate, args.pretty)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(dish = %args.dish_name, error = %e, "Estimation failed");
            let response = ErrorResponse::from(e);
            println!("{}", render(&response, args.pretty)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Serialize a value compactly or pretty-printed
fn render<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}
