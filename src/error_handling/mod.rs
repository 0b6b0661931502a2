//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for configuration, geocoding, lookup, encoding and batch I/O
//! - Per-row failure categorization
//! - Processing statistics tracking

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{
    BatchError, ConfigurationError, EncodeError, FailureType, GeocodeError,
    InitializationError, LookupAttempt, LookupError, MappingError,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for failure in FailureType::iter() {
            assert_eq!(stats.get_failure_count(failure), 0);
        }
    }

    #[test]
    fn test_processing_stats_multiple_increments() {
        let stats = ProcessingStats::new();
        stats.increment_failure(FailureType::IdentifierNotFound);
        stats.increment_failure(FailureType::IdentifierNotFound);
        stats.increment_failure(FailureType::MappingError);
        assert_eq!(stats.get_failure_count(FailureType::IdentifierNotFound), 2);
        assert_eq!(stats.get_failure_count(FailureType::MappingError), 1);
        assert_eq!(stats.total_failures(), 3);
    }

    #[test]
    fn test_processing_stats_counts_encode_error_category() {
        let stats = ProcessingStats::new();
        let err = EncodeError::from(MappingError::UnsupportedCountry("CANADA".to_string()));
        stats.increment_failure(err.category());
        assert_eq!(stats.get_failure_count(FailureType::UnsupportedCountry), 1);
    }
}
