//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoints, timeouts, credential variable names)
//! - CLI option types and parsing
//! - The library `Config` and `Credentials`

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{log_settings_from_env, Config, Credentials, LogFormat, LogLevel, Opt};
