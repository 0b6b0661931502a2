//! Primary mapping from a geocoder result to Placekey query fields.

use crate::geocode::{ContextToken, GeocodeResult};
use crate::placekey::IdentifierPayload;

/// City, region, postcode and country pulled out of a context list.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ContextFields<'a> {
    pub city: Option<&'a str>,
    pub region: Option<&'a str>,
    pub postal_code: Option<&'a str>,
    pub iso_country_code: Option<&'a str>,
}

/// Scans the context list once, keeping the first token of each category.
///
/// The country is taken from the token's short code, the others from its text.
pub(crate) fn scan_context(tokens: &[ContextToken]) -> ContextFields<'_> {
    let mut fields = ContextFields::default();
    let mut seen_country = false;

    for token in tokens {
        let text = Some(token.text.as_str());
        if token.is_category("place") {
            fields.city = fields.city.or(text);
        } else if token.is_category("region") {
            fields.region = fields.region.or(text);
        } else if token.is_category("postcode") {
            fields.postal_code = fields.postal_code.or(text);
        } else if token.is_category("country") && !seen_country {
            seen_country = true;
            fields.iso_country_code = token.short_code.as_deref();
        }
    }

    fields
}

/// Builds the Placekey query for a geocoder result.
///
/// POI results use the POI's own street address and name. Plain address results
/// rebuild the street line as `"<house number> <street>"` and carry no name.
///
/// Returns `None` if the result has no complete street line; such results can
/// only be looked up through [`parse_from_address_string`](super::parse_from_address_string).
pub fn primary_payload(result: &GeocodeResult) -> Option<IdentifierPayload> {
    let street_address = result.street_line()?;
    let location_name = match result {
        GeocodeResult::Poi { name, .. } => Some(name.clone()),
        GeocodeResult::Address { .. } => None,
    };

    let context = scan_context(result.context());

    Some(IdentifierPayload {
        location_name,
        street_address,
        city: context.city.map(str::to_string),
        region: context.region.map(str::to_string),
        postal_code: context.postal_code.map(str::to_string),
        iso_country_code: context.iso_country_code.map(str::to_string),
        latitude: result.latitude(),
        longitude: result.longitude(),
    })
}

/// Merges a caller-supplied POI name into the query.
///
/// A blank hint is ignored. The hint fills an absent name, and replaces an
/// existing one only when `prefer_hint` is set.
pub fn apply_name_hint(payload: &mut IdentifierPayload, hint: Option<&str>, prefer_hint: bool) {
    let Some(hint) = hint.filter(|h| !h.trim().is_empty()) else {
        return;
    };
    if payload.location_name.is_none() || prefer_hint {
        payload.location_name = Some(hint.to_string());
    }
}

/// [`primary_payload`] followed by [`apply_name_hint`].
pub fn to_payload(
    result: &GeocodeResult,
    hint: Option<&str>,
    prefer_hint: bool,
) -> Option<IdentifierPayload> {
    let mut payload = primary_payload(result)?;
    apply_name_hint(&mut payload, hint, prefer_hint);
    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::Place;

    fn token(id: &str, text: &str, short_code: Option<&str>) -> ContextToken {
        ContextToken {
            id: id.to_string(),
            text: text.to_string(),
            short_code: short_code.map(str::to_string),
        }
    }

    fn nj_context() -> Vec<ContextToken> {
        vec![
            token("postcode.7990470578213230", "07980", None),
            token("place.11270451449706160", "Long Hill", None),
            token("region.10319855877567130", "New Jersey", Some("US-NJ")),
            token("country.19678805456372290", "United States", Some("us")),
        ]
    }

    fn place(context: Vec<ContextToken>) -> Place {
        Place {
            formatted_address:
                "ShopRite of Stirling, 1153 Valley Rd, Long Hill, New Jersey 07980, United States"
                    .to_string(),
            latitude: 40.674,
            longitude: -74.497,
            context,
        }
    }

    fn poi() -> GeocodeResult {
        GeocodeResult::Poi {
            name: "ShopRite of Stirling".to_string(),
            street_address: Some("1153 Valley Rd".to_string()),
            place: place(nj_context()),
        }
    }

    fn address() -> GeocodeResult {
        GeocodeResult::Address {
            house_number: Some("1153".to_string()),
            street: "Valley Road".to_string(),
            place: place(nj_context()),
        }
    }

    #[test]
    fn test_poi_uses_own_street_address_and_name() {
        let payload = primary_payload(&poi()).unwrap();
        assert_eq!(payload.street_address, "1153 Valley Rd");
        assert_eq!(payload.location_name.as_deref(), Some("ShopRite of Stirling"));
        assert_eq!(payload.city.as_deref(), Some("Long Hill"));
        assert_eq!(payload.region.as_deref(), Some("New Jersey"));
        assert_eq!(payload.postal_code.as_deref(), Some("07980"));
        assert_eq!(payload.iso_country_code.as_deref(), Some("us"));
        assert_eq!(payload.latitude, 40.674);
        assert_eq!(payload.longitude, -74.497);
    }

    #[test]
    fn test_address_joins_house_number_and_street() {
        let payload = primary_payload(&address()).unwrap();
        assert_eq!(payload.street_address, "1153 Valley Road");
        assert_eq!(payload.location_name, None);
    }

    #[test]
    fn test_no_payload_without_street_line() {
        let street_level = GeocodeResult::Address {
            house_number: None,
            street: "Valley Road".to_string(),
            place: place(nj_context()),
        };
        assert_eq!(primary_payload(&street_level), None);
        assert_eq!(to_payload(&street_level, Some("ShopRite"), true), None);

        let unaddressed_poi = GeocodeResult::Poi {
            name: "ShopRite of Stirling".to_string(),
            street_address: None,
            place: place(nj_context()),
        };
        assert_eq!(primary_payload(&unaddressed_poi), None);
    }

    #[test]
    fn test_context_scan_is_order_independent() {
        let mut reversed = nj_context();
        reversed.reverse();
        assert_eq!(scan_context(&reversed), scan_context(&nj_context()));
    }

    #[test]
    fn test_context_scan_takes_first_match_per_category() {
        let tokens = vec![
            token("place.1", "Long Hill", None),
            token("region.1", "New Jersey", Some("US-NJ")),
            token("place.2", "Stirling", None),
            token("country.1", "United States", Some("us")),
            token("country.2", "Canada", Some("ca")),
            token("region.2", "Ontario", Some("CA-ON")),
        ];
        let fields = scan_context(&tokens);
        assert_eq!(fields.city, Some("Long Hill"));
        assert_eq!(fields.region, Some("New Jersey"));
        assert_eq!(fields.iso_country_code, Some("us"));
    }

    #[test]
    fn test_context_scan_tolerates_missing_categories() {
        let tokens = vec![
            token("neighborhood.1", "Millington", None),
            token("locality.1", "Stirling", None),
        ];
        assert_eq!(scan_context(&tokens), ContextFields::default());
    }

    #[test]
    fn test_country_without_short_code_stays_absent() {
        let tokens = vec![
            token("country.1", "United States", None),
            token("country.2", "United States", Some("us")),
        ];
        assert_eq!(scan_context(&tokens).iso_country_code, None);
    }

    #[test]
    fn test_hint_fills_missing_name() {
        let payload = to_payload(&address(), Some("ShopRite"), false).unwrap();
        assert_eq!(payload.location_name.as_deref(), Some("ShopRite"));
    }

    #[test]
    fn test_hint_does_not_replace_name_by_default() {
        let payload = to_payload(&poi(), Some("ShopRite"), false).unwrap();
        assert_eq!(payload.location_name.as_deref(), Some("ShopRite of Stirling"));
    }

    #[test]
    fn test_preferred_hint_replaces_name() {
        let payload = to_payload(&poi(), Some("ShopRite"), true).unwrap();
        assert_eq!(payload.location_name.as_deref(), Some("ShopRite"));
    }

    #[test]
    fn test_blank_hint_is_ignored() {
        let payload = to_payload(&address(), Some("  "), true).unwrap();
        assert_eq!(payload.location_name, None);

        let payload = to_payload(&poi(), None, true).unwrap();
        assert_eq!(payload.location_name.as_deref(), Some("ShopRite of Stirling"));
    }
}
