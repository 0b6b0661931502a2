//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a run:
//! - Logger
//! - HTTP client
//! - Geocoder rate limiter

mod client;
mod logger;
mod rate_limiter;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use rate_limiter::{init_rate_limiter, RateLimiter};
