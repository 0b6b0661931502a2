//! Placekey request and response types.

use serde::{Deserialize, Serialize};

/// Normalized query sent to the Placekey API.
///
/// `street_address`, `latitude` and `longitude` are always present. Absent
/// optional fields are left out of the JSON rather than sent as null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifierPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    pub street_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso_country_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Outcome of a single Placekey query.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentifierResult {
    Found { placekey: String, query_id: String },
    Rejected { error: String, query_id: Option<String> },
}

/// `POST /v1/placekey` body.
#[derive(Debug, Serialize)]
pub(crate) struct LookupRequest<'a> {
    pub query: &'a IdentifierPayload,
}

/// Either shape of a Placekey response body.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LookupResponse {
    Found {
        placekey: String,
        #[serde(default)]
        query_id: Option<serde_json::Value>,
    },
    Rejected {
        #[serde(alias = "message")]
        error: String,
        #[serde(default)]
        query_id: Option<serde_json::Value>,
    },
}

/// Placekey echoes `query_id` as a string, but older deployments send a number.
fn query_id_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

impl From<LookupResponse> for IdentifierResult {
    fn from(response: LookupResponse) -> Self {
        match response {
            LookupResponse::Found { placekey, query_id } => IdentifierResult::Found {
                placekey,
                query_id: query_id.map(query_id_to_string).unwrap_or_default(),
            },
            LookupResponse::Rejected { error, query_id } => IdentifierResult::Rejected {
                error,
                query_id: query_id.map(query_id_to_string),
            },
        }
    }
}
