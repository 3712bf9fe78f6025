//! debris-cli: Command-line client for the debris classification service.
//!
//! Derives the same local metadata the web app shows (file size, pixel
//! dimensions, EXIF GPS location) for an image on disk, then uploads it
//! to the classification service and prints the prediction.
//!
//! # Usage
//!
//! ```text
//! cargo run --bin debris-cli -- [OPTIONS] <IMAGE_PATH>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod http;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use debris_flow::config::{DEFAULT_ENDPOINT, ENDPOINT_ENV};
use debris_flow::{ClassifierConfig, SelectedImage, derive_stats, extract_location};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::report::Report;

/// Classify an image for space debris with a remote model.
///
/// Prints the image's size, dimensions and GPS location, then the
/// label, probability and class returned by the service.
#[derive(Parser)]
#[command(name = "debris-cli", version)]
struct Cli {
    /// Path to the input image (PNG or JPEG).
    image_path: PathBuf,

    /// URL of the prediction endpoint.
    #[arg(long, env = ENDPOINT_ENV, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Only derive local metadata; do not contact the service.
    #[arg(long)]
    stats_only: bool,

    /// Output the report as JSON instead of human-readable text.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClassifierConfig::from_env_value(Some(&cli.endpoint));

    let bytes = match std::fs::read(&cli.image_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {}: {e}", cli.image_path.display());
            return ExitCode::FAILURE;
        }
    };
    let file_name = cli
        .image_path
        .file_name()
        .map_or_else(|| "image".to_owned(), |n| n.to_string_lossy().into_owned());
    let image = SelectedImage::new(bytes, file_name);

    let mut report = Report::new(&image);
    report.stats = derive_stats(&image)
        .inspect_err(|e| debug!(error = %e, "image stats unavailable"))
        .ok();
    report.location = extract_location(&image.bytes)
        .inspect_err(|e| debug!(error = %e, "location unavailable"))
        .ok()
        .flatten();

    if !cli.stats_only {
        match http::classify(&config.endpoint, &image) {
            Ok(prediction) => report.prediction = Some(prediction),
            Err(e) => report.error = Some(e.to_string()),
        }
    }

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", report.render_text());
    }

    if report.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
