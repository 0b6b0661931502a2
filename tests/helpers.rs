// Shared test helpers: Mapbox/Placekey fixtures served by wiremock.
//
// Used by the integration test files through `mod helpers;`.

use std::time::Duration;

use placekey_normalizer::{AddressNormalizer, Config, Credentials};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const MAPBOX_TOKEN: &str = "test-mapbox-token";
pub const PLACEKEY_KEY: &str = "test-placekey-key";

/// Config whose endpoints both point at the mock server.
#[allow(dead_code)]
pub fn test_config(server: &MockServer, min_delay: Duration) -> Config {
    Config {
        credentials: Credentials {
            mapbox_token: MAPBOX_TOKEN.to_string(),
            placekey_api_key: PLACEKEY_KEY.to_string(),
        },
        geocoder_base_url: server.uri(),
        placekey_base_url: server.uri(),
        geocode_min_delay: min_delay,
        timeout_seconds: 5,
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn normalizer_for(server: &MockServer) -> AddressNormalizer {
    AddressNormalizer::from_config(&test_config(server, Duration::ZERO))
        .expect("Failed to build normalizer")
}

/// Context tokens for a US location.
pub fn us_context(postcode: &str, city: &str, region: &str, region_code: &str) -> Value {
    json!([
        {"id": "postcode.8751660498846820", "text": postcode},
        {"id": "place.9964251954009910", "text": city},
        {"id": "region.9355588101584720", "short_code": region_code, "text": region},
        {"id": "country.14135384517372290", "wikidata": "Q30", "short_code": "us", "text": "United States"}
    ])
}

#[allow(dead_code)]
pub fn poi_feature(name: &str, street: &str, place_name: &str, center: [f64; 2], context: Value) -> Value {
    json!({
        "id": "poi.412316954969",
        "type": "Feature",
        "place_type": ["poi"],
        "relevance": 1,
        "properties": {"landmark": true, "address": street, "category": "shop"},
        "text": name,
        "place_name": place_name,
        "center": center,
        "geometry": {"coordinates": center, "type": "Point"},
        "context": context
    })
}

#[allow(dead_code)]
pub fn address_feature(house_number: &str, street: &str, place_name: &str, center: [f64; 2], context: Value) -> Value {
    json!({
        "id": "address.5087218326591080",
        "type": "Feature",
        "place_type": ["address"],
        "relevance": 0.9,
        "properties": {"accuracy": "rooftop"},
        "text": street,
        "place_name": place_name,
        "center": center,
        "geometry": {"type": "Point", "coordinates": center},
        "address": house_number,
        "context": context
    })
}

/// ShopRite of Stirling, a POI result.
#[allow(dead_code)]
pub fn shoprite_feature() -> Value {
    poi_feature(
        "ShopRite of Stirling",
        "1153 Valley Rd",
        "ShopRite of Stirling, 1153 Valley Rd, Long Hill, New Jersey 07980, United States",
        [-74.497451, 40.674612],
        us_context("07980", "Long Hill", "New Jersey", "US-NJ"),
    )
}

/// 10575 Kenai Spur Highway, a plain address result.
#[allow(dead_code)]
pub fn kenai_feature() -> Value {
    address_feature(
        "10575",
        "Kenai Spur Highway",
        "10575 Kenai Spur Highway, Kenai, Alaska 99611, United States",
        [-151.245263, 60.570188],
        us_context("99611", "Kenai", "Alaska", "US-AK"),
    )
}

/// Serves `features` for geocoder requests whose query starts with `query_prefix`
/// (percent-encoded, as it appears in the request path).
#[allow(dead_code)]
pub async fn mount_geocode(server: &MockServer, query_prefix: &str, features: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path_regex(format!(
            r"^/geocoding/v5/mapbox\.places/{}.*\.json$",
            query_prefix
        )))
        .and(query_param("access_token", MAPBOX_TOKEN))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"type": "FeatureCollection", "features": features})),
        )
        .mount(server)
        .await;
}

/// Answers Placekey queries that contain `query` with a placekey.
#[allow(dead_code)]
pub fn placekey_found(query: Value, placekey: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path("/v1/placekey"))
        .and(header("apikey", PLACEKEY_KEY))
        .and(body_partial_json(json!({ "query": query })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"query_id": "0", "placekey": placekey})),
        )
}

/// Rejects Placekey queries that contain `query`.
#[allow(dead_code)]
pub fn placekey_rejected(query: Value, error: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path("/v1/placekey"))
        .and(header("apikey", PLACEKEY_KEY))
        .and(body_partial_json(json!({ "query": query })))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"query_id": "0", "error": error})),
        )
}

/// Number of requests the server received for `request_path`.
#[allow(dead_code)]
pub async fn request_count(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == request_path)
        .count()
}
