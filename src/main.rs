//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `placekey_normalizer` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Exit status
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use placekey_normalizer::config::log_settings_from_env;
use placekey_normalizer::initialization::init_logger_with;
use placekey_normalizer::{run_batch, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load API keys from .env in the current directory, or next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    let (log_level, log_format) = log_settings_from_env();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let config = match Config::from_opt(opt) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    };

    match run_batch(config).await {
        Ok(report) => {
            println!(
                "Encoded {} of {} row{} ({} failed) in {:.1}s",
                report.encoded,
                report.total_rows,
                if report.total_rows == 1 { "" } else { "s" },
                report.failed,
                report.elapsed_seconds
            );
            println!("Results saved in {}", report.output.display());
            Ok(())
        }
        Err(e) => {
            log::error!("{:#}", e);
            process::exit(1);
        }
    }
}
