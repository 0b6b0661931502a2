//! Fallback mapping that re-derives the query from the formatted address string.
//!
//! Used when Placekey rejects the primary query. The formatted address is expected
//! to look like `"[NAME, ...,] STREET, CITY, REGION ZIP, COUNTRY"`.

use crate::config::{SUPPORTED_COUNTRY_CODE, SUPPORTED_COUNTRY_NAME};
use crate::error_handling::MappingError;
use crate::geocode::GeocodeResult;
use crate::placekey::IdentifierPayload;

/// Parses the result's formatted address into a Placekey query.
///
/// Every part is uppercased and trimmed. Parts are taken from the end: country,
/// `"REGION ZIP"`, city, street; whatever remains is the location name.
///
/// # Errors
///
/// - `MappingError::UnsupportedCountry` if the country is not the United States
/// - `MappingError::TooFewAddressParts` if the address lacks a street, city or postal code
pub fn parse_from_address_string(result: &GeocodeResult) -> Result<IdentifierPayload, MappingError> {
    let formatted = result.formatted_address();
    let too_few = || MappingError::TooFewAddressParts(formatted.to_string());

    let mut parts: Vec<String> = formatted
        .split(", ")
        .map(|part| part.trim().to_uppercase())
        .collect();

    let country = parts.pop().ok_or_else(too_few)?;
    if country != SUPPORTED_COUNTRY_NAME {
        return Err(MappingError::UnsupportedCountry(country));
    }

    let region_zip = parts.pop().ok_or_else(too_few)?;
    let city = parts.pop().ok_or_else(too_few)?;
    let street_address = parts.pop().ok_or_else(too_few)?;

    let mut region_parts: Vec<&str> = region_zip.split_whitespace().collect();
    let postal_code = region_parts.pop().ok_or_else(too_few)?.to_string();
    let region = region_parts.join(" ");

    let location_name = parts.join(", ");

    Ok(IdentifierPayload {
        location_name: Some(location_name).filter(|name| !name.trim().is_empty()),
        street_address,
        city: Some(city),
        region: Some(region),
        postal_code: Some(postal_code),
        iso_country_code: Some(SUPPORTED_COUNTRY_CODE.to_string()),
        latitude: result.latitude(),
        longitude: result.longitude(),
    })
}
