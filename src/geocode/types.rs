//! Geocoder response types.
//!
//! The Mapbox response is deserialized into loosely typed `Raw*` structs first,
//! then converted into [`GeocodeResult`], which only carries the fields that exist
//! for each kind of result.

use serde::Deserialize;

use crate::error_handling::MappingError;

/// Mapbox forward-geocoding response body.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<RawFeature>,
}

/// One Mapbox feature, as returned on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFeature {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub place_type: Vec<String>,
    /// Place name for POIs, street name for addresses
    pub text: Option<String>,
    /// Full formatted address
    pub place_name: Option<String>,
    /// House number (address results only)
    pub address: Option<String>,
    pub properties: Option<RawProperties>,
    /// `[longitude, latitude]`
    pub center: Option<Vec<f64>>,
    pub context: Option<Vec<ContextToken>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProperties {
    /// Street address (POI results only)
    pub address: Option<String>,
}

/// A category-tagged fragment of a feature: city, region, postcode, country, ...
///
/// The category is the prefix of `id`, e.g. `postcode.8751660498846820`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContextToken {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub short_code: Option<String>,
}

impl ContextToken {
    pub fn is_category(&self, prefix: &str) -> bool {
        self.id.starts_with(prefix)
    }
}

/// Fields shared by every kind of geocoder result.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub formatted_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub context: Vec<ContextToken>,
}

/// A geocoded location.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeResult {
    /// A named point of interest (store, restaurant, ...).
    Poi {
        name: String,
        /// Absent when Mapbox knows the POI but not its street line
        street_address: Option<String>,
        place: Place,
    },
    /// A street address. Street-level matches carry no house number.
    Address {
        house_number: Option<String>,
        street: String,
        place: Place,
    },
}

impl GeocodeResult {
    pub fn place(&self) -> &Place {
        match self {
            GeocodeResult::Poi { place, .. } | GeocodeResult::Address { place, .. } => place,
        }
    }

    pub fn formatted_address(&self) -> &str {
        &self.place().formatted_address
    }

    pub fn latitude(&self) -> f64 {
        self.place().latitude
    }

    pub fn longitude(&self) -> f64 {
        self.place().longitude
    }

    pub fn context(&self) -> &[ContextToken] {
        &self.place().context
    }

    pub fn is_poi(&self) -> bool {
        matches!(self, GeocodeResult::Poi { .. })
    }

    /// Street line for a Placekey query: the POI's own street address, or
    /// `"<house number> <street>"` for an address.
    ///
    /// `None` if the result has no complete street line.
    pub fn street_line(&self) -> Option<String> {
        match self {
            GeocodeResult::Poi { street_address, .. } => street_address
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            GeocodeResult::Address {
                house_number,
                street,
                ..
            } => house_number
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(|n| format!("{} {}", n, street)),
        }
    }
}

impl TryFrom<RawFeature> for GeocodeResult {
    type Error = MappingError;

    fn try_from(raw: RawFeature) -> Result<Self, Self::Error> {
        let is_poi = raw.place_type.iter().any(|t| t == "poi");
        let text = raw.text.ok_or(MappingError::MissingField("text"))?;
        let formatted_address = raw
            .place_name
            .ok_or(MappingError::MissingField("place_name"))?;
        let context = raw.context.ok_or(MappingError::MissingField("context"))?;
        let (longitude, latitude) = match raw.center.as_deref() {
            Some([lon, lat]) => (*lon, *lat),
            Some(other) => return Err(MappingError::InvalidCenter(other.len())),
            None => return Err(MappingError::MissingField("center")),
        };
        let place = Place {
            formatted_address,
            latitude,
            longitude,
            context,
        };

        if is_poi {
            Ok(GeocodeResult::Poi {
                name: text,
                street_address: raw.properties.and_then(|p| p.address),
                place,
            })
        } else {
            Ok(GeocodeResult::Address {
                house_number: raw.address,
                street: text,
                place,
            })
        }
    }
}
