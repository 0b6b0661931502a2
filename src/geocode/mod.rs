//! Geocoding through the Mapbox places API.
//!
//! This module provides:
//! - The rate-limited [`Geocoder`] client
//! - The [`GeocodeResult`] union of POI and plain-address results
//! - The raw wire types it is converted from

mod client;
mod types;

pub use client::Geocoder;
pub use types::{ContextToken, FeatureCollection, GeocodeResult, Place, RawFeature, RawProperties};
