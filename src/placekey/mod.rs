//! Placekey lookups.

mod client;
mod types;

pub use client::PlacekeyClient;
pub use types::{IdentifierPayload, IdentifierResult};
