//! Configuration constants.
//!
//! This module defines the constants used throughout the application: credential
//! variable names, service endpoints, timeouts and the output column name.

use std::time::Duration;

// Credentials
/// Environment variable holding the Mapbox access token
pub const MAPBOX_TOKEN_ENV_VAR: &str = "MAPBOX_API_TOKEN";
/// Environment variable holding the Placekey API key
pub const PLACEKEY_KEY_ENV_VAR: &str = "PLACEKEY_API_KEY";

// Endpoint overrides (used by tests and self-hosted proxies)
pub const GEOCODER_BASE_URL_ENV_VAR: &str = "GEOCODER_BASE_URL";
pub const PLACEKEY_BASE_URL_ENV_VAR: &str = "PLACEKEY_BASE_URL";

/// Log level selector (`error` .. `trace`)
pub const LOG_LEVEL_ENV_VAR: &str = "LOG_LEVEL";
/// Log format selector (`plain` or `json`)
pub const LOG_FORMAT_ENV_VAR: &str = "LOG_FORMAT";

pub const DEFAULT_GEOCODER_BASE_URL: &str = "https://api.mapbox.com";
pub const DEFAULT_PLACEKEY_BASE_URL: &str = "https://api.placekey.io";

/// Mapbox forward-geocoding endpoint, relative to the geocoder base URL.
/// The query text and `.json` suffix are appended as the final path segment.
pub const GEOCODER_PLACES_PATH: &[&str] = &["geocoding", "v5", "mapbox.places"];

/// Placekey single-lookup endpoint, relative to the Placekey base URL.
pub const PLACEKEY_LOOKUP_PATH: &[&str] = &["v1", "placekey"];

/// Minimum delay between two geocoder calls.
pub const GEOCODE_MIN_DELAY: Duration = Duration::from_millis(200);

/// Per-request timeout in seconds for both external services
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_USER_AGENT: &str = concat!("placekey_normalizer/", env!("CARGO_PKG_VERSION"));

/// Column appended to every output row.
pub const PLACEKEY_COLUMN: &str = "placekey";

/// Country literal accepted by the address-string fallback parser (after uppercasing).
pub const SUPPORTED_COUNTRY_NAME: &str = "UNITED STATES";
pub const SUPPORTED_COUNTRY_CODE: &str = "us";
