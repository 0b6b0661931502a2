//! placekey_normalizer library: encode point-of-interest addresses as Placekeys
//!
//! Each address is geocoded through Mapbox, mapped onto Placekey's query fields,
//! and looked up through the Placekey API. A CSV driver runs this over a whole
//! file with per-row error isolation.
//!
//! # Example
//!
//! ```no_run
//! use placekey_normalizer::{run_batch, Config, Credentials};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: PathBuf::from("stores.csv"),
//!     output: PathBuf::from("stores_placekey.csv"),
//!     address_column: "Address".to_string(),
//!     location_column: "Name".to_string(),
//!     credentials: Credentials::from_env()?,
//!     ..Default::default()
//! };
//!
//! let report = run_batch(config).await?;
//! println!("{} of {} rows encoded", report.encoded, report.total_rows);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod batch;
pub mod config;
pub mod error_handling;
pub mod geocode;
pub mod initialization;
pub mod mapping;
pub mod normalizer;
pub mod placekey;

// Re-export public API
pub use batch::{process_file, BatchOptions, BatchReport};
pub use config::{Config, Credentials, LogFormat, LogLevel, Opt};
pub use error_handling::{BatchError, ConfigurationError, EncodeError, MappingError};
pub use normalizer::{AddressNormalizer, EncodedAddress};
pub use run::run_batch;

mod run {
    use anyhow::{Context, Result};
    use log::info;

    use crate::batch::{process_file, BatchOptions, BatchReport};
    use crate::config::Config;
    use crate::normalizer::AddressNormalizer;

    /// Encodes every row of `config.input` into `config.output`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API clients cannot be built or the batch aborts
    /// (unreadable input, unwritable output, missing column). Per-row failures
    /// are logged and do not fail the run.
    pub async fn run_batch(config: Config) -> Result<BatchReport> {
        let input = std::path::absolute(&config.input).unwrap_or_else(|_| config.input.clone());
        let output = std::path::absolute(&config.output).unwrap_or_else(|_| config.output.clone());
        info!(
            "Writing to {} from {} address: {} location: {}",
            output.display(),
            input.display(),
            config.address_column,
            config.location_column
        );

        let normalizer = AddressNormalizer::from_config(&config)?;
        let options = BatchOptions {
            input: config.input,
            output: config.output,
            address_column: config.address_column,
            location_column: config.location_column,
        };

        process_file(&normalizer, &options)
            .await
            .context("Error occurred writing to file")
    }
}
