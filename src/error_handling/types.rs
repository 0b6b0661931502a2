//! Error type definitions.
//!
//! This module defines the error types used throughout the application and the
//! failure categories counted during a batch run.

use std::fmt;
use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::placekey::IdentifierPayload;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Configuration problems detected before any network activity.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// A required credential is unset or empty.
    #[error("API key missing in environment variable {0}")]
    MissingCredential(&'static str),
}

/// A geocoder result could not be turned into Placekey query fields.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    /// The raw feature lacks a field its result kind requires.
    #[error("geocoder feature is missing `{0}`")]
    MissingField(&'static str),

    /// `center` did not hold exactly a longitude and a latitude.
    #[error("geocoder feature center has {0} coordinates, expected 2")]
    InvalidCenter(usize),

    /// The formatted address names a country other than the United States.
    #[error("Could not map country code for {0:?}")]
    UnsupportedCountry(String),

    /// The formatted address has fewer parts than country, region/zip, city and street.
    #[error("formatted address {0:?} has too few comma-separated parts")]
    TooFewAddressParts(String),
}

/// Errors from the geocoding service.
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// Network or decoding failure.
    #[error("geocoder request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// Non-success HTTP status.
    #[error("geocoder returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered with an empty feature list.
    #[error("geocoder returned no result for {0:?}")]
    NoResult(String),

    /// The first feature could not be interpreted.
    #[error("Could not parse raw geocoder result: {0}")]
    Mapping(#[from] MappingError),

    /// The geocoder base URL is not a valid base.
    #[error("invalid geocoder URL: {0}")]
    InvalidUrl(String),
}

/// Errors from the Placekey service that are not a rejection of the query.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Network or decoding failure.
    #[error("Placekey request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// Status that carries no usable result body (429, 5xx, ...).
    #[error("Placekey returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Body that is neither a placekey nor an error object.
    #[error("Placekey returned an unexpected body: {0}")]
    UnexpectedBody(String),
}

/// One rejected Placekey query, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupAttempt {
    pub payload: IdentifierPayload,
    pub error: String,
}

impl fmt::Display for LookupAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.payload) {
            Ok(json) => write!(f, "{} -> {}", json, self.error),
            Err(_) => write!(f, "{:?} -> {}", self.payload, self.error),
        }
    }
}

/// Per-address failures of the encode pipeline.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Every query made for the address was rejected.
    ///
    /// `first` is the primary query; it is absent when the geocoder result had no
    /// street line and only the address-string query was made.
    #[error("Placekey not found for address {address:?} ({})", describe_attempts(.first.as_deref(), .second))]
    IdentifierNotFound {
        address: String,
        first: Option<Box<LookupAttempt>>,
        second: Box<LookupAttempt>,
    },
}

fn describe_attempts(first: Option<&LookupAttempt>, second: &LookupAttempt) -> String {
    match first {
        Some(first) => format!("1st attempt: {}; 2nd attempt: {}", first, second),
        None => format!("address-string attempt: {}", second),
    }
}

impl EncodeError {
    /// Maps the error onto the counter it is tallied under.
    pub fn category(&self) -> FailureType {
        match self {
            EncodeError::Geocode(GeocodeError::NoResult(_)) => FailureType::NoGeocodeResult,
            EncodeError::Geocode(GeocodeError::Mapping(_)) => FailureType::MappingError,
            EncodeError::Geocode(_) => FailureType::GeocoderTransport,
            EncodeError::Mapping(MappingError::UnsupportedCountry(_)) => {
                FailureType::UnsupportedCountry
            }
            EncodeError::Mapping(_) => FailureType::MappingError,
            EncodeError::Lookup(_) => FailureType::PlacekeyTransport,
            EncodeError::IdentifierNotFound { .. } => FailureType::IdentifierNotFound,
        }
    }
}

/// Fatal errors of a batch run.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Failed to open input file {path}: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to create output file {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("column {0:?} not found in input header")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Categories of per-row failures counted during a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureType {
    GeocoderTransport,
    NoGeocodeResult,
    MappingError,
    UnsupportedCountry,
    PlacekeyTransport,
    IdentifierNotFound,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureType::GeocoderTransport => "Geocoder request error",
            FailureType::NoGeocodeResult => "No geocoder result",
            FailureType::MappingError => "Geocoder result mapping error",
            FailureType::UnsupportedCountry => "Unsupported country",
            FailureType::PlacekeyTransport => "Placekey request error",
            FailureType::IdentifierNotFound => "Placekey not found",
        }
    }
}
