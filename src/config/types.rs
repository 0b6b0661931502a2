//! Configuration types and CLI options.
//!
//! This module defines the enums and structs used for command-line argument parsing
//! and configuration. The CLI only carries the four positional arguments; everything
//! else (credentials, endpoints, log settings) comes from the environment.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_GEOCODER_BASE_URL, DEFAULT_PLACEKEY_BASE_URL, DEFAULT_USER_AGENT, GEOCODER_BASE_URL_ENV_VAR,
    GEOCODE_MIN_DELAY, LOG_FORMAT_ENV_VAR, LOG_LEVEL_ENV_VAR, MAPBOX_TOKEN_ENV_VAR,
    PLACEKEY_BASE_URL_ENV_VAR, PLACEKEY_KEY_ENV_VAR, REQUEST_TIMEOUT_SECS,
};
use crate::error_handling::ConfigurationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Read from `LOG_LEVEL`.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line arguments.
///
/// # Examples
///
/// ```bash
/// placekey_normalizer stores.csv stores_placekey.csv Address Name
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "placekey_normalizer",
    version,
    about = "process CSV file of addresses"
)]
pub struct Opt {
    /// input CSV file path
    #[arg(value_parser)]
    pub csv: PathBuf,

    /// output CSV file path
    #[arg(value_parser)]
    pub output: PathBuf,

    /// address column name from input CSV
    pub address: String,

    /// location column name from input CSV
    pub location: String,
}

/// API credentials for the two external services.
#[derive(Clone, Default)]
pub struct Credentials {
    pub mapbox_token: String,
    pub placekey_api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("mapbox_token", &"<redacted>")
            .field("placekey_api_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Reads both credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingCredential` naming the first variable
    /// that is unset or empty.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads both credentials through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigurationError::MissingCredential(name))
        };
        Ok(Self {
            mapbox_token: require(MAPBOX_TOKEN_ENV_VAR)?,
            placekey_api_key: require(PLACEKEY_KEY_ENV_VAR)?,
        })
    }
}

/// Reads the log level and format from `LOG_LEVEL` and `LOG_FORMAT`.
///
/// Unset or unrecognized values fall back to `info` and `plain`.
pub fn log_settings_from_env() -> (LogLevel, LogFormat) {
    log_settings_from_lookup(|name| std::env::var(name).ok())
}

fn log_settings_from_lookup<F>(lookup: F) -> (LogLevel, LogFormat)
where
    F: Fn(&str) -> Option<String>,
{
    let level = lookup(LOG_LEVEL_ENV_VAR)
        .and_then(|v| LogLevel::from_str(v.trim(), true).ok())
        .unwrap_or(LogLevel::Info);
    let format = lookup(LOG_FORMAT_ENV_VAR)
        .and_then(|v| LogFormat::from_str(v.trim(), true).ok())
        .unwrap_or(LogFormat::Plain);
    (level, format)
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use placekey_normalizer::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     input: PathBuf::from("stores.csv"),
///     output: PathBuf::from("stores_placekey.csv"),
///     address_column: "Address".to_string(),
///     location_column: "Name".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// CSV file to read addresses from
    pub input: PathBuf,

    /// CSV file to write results to
    pub output: PathBuf,

    /// Name of the address column
    pub address_column: String,

    /// Name of the location-name column
    pub location_column: String,

    /// Mapbox and Placekey credentials
    pub credentials: Credentials,

    /// Mapbox API base URL
    pub geocoder_base_url: String,

    /// Placekey API base URL
    pub placekey_base_url: String,

    /// Minimum delay between geocoder calls
    pub geocode_min_delay: Duration,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.csv"),
            output: PathBuf::from("output.csv"),
            address_column: "Address".to_string(),
            location_column: "Name".to_string(),
            credentials: Credentials::default(),
            geocoder_base_url: DEFAULT_GEOCODER_BASE_URL.to_string(),
            placekey_base_url: DEFAULT_PLACEKEY_BASE_URL.to_string(),
            geocode_min_delay: GEOCODE_MIN_DELAY,
            timeout_seconds: REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Builds a configuration from parsed CLI arguments and the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingCredential` if either API credential is absent.
    pub fn from_opt(opt: Opt) -> Result<Self, ConfigurationError> {
        Self::from_opt_with(opt, |name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_opt`], resolving environment values through `lookup`.
    pub fn from_opt_with<F>(opt: Opt, lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::from_lookup(&lookup)?;
        let defaults = Self::default();
        Ok(Self {
            input: opt.csv,
            output: opt.output,
            address_column: opt.address,
            location_column: opt.location,
            credentials,
            geocoder_base_url: lookup(GEOCODER_BASE_URL_ENV_VAR)
                .unwrap_or(defaults.geocoder_base_url),
            placekey_base_url: lookup(PLACEKEY_BASE_URL_ENV_VAR)
                .unwrap_or(defaults.placekey_base_url),
            ..defaults
        })
    }
}
