//! Mapping geocoder results onto Placekey query fields.
//!
//! Two mappings exist: the primary one works from the structured result, the
//! fallback re-parses the formatted address string and is only used after
//! Placekey rejects the primary query.

mod fallback;
mod fields;

pub use fallback::parse_from_address_string;
pub use fields::{apply_name_hint, primary_payload, to_payload};
