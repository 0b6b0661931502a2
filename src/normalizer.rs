//! Address normalization: geocode, map, and look up a Placekey.

use anyhow::{Context, Result};
use log::{error, info, warn};

use crate::config::Config;
use crate::error_handling::{EncodeError, GeocodeError, LookupAttempt};
use crate::geocode::{GeocodeResult, Geocoder};
use crate::initialization::{init_client, init_rate_limiter};
use crate::mapping::{parse_from_address_string, to_payload};
use crate::placekey::{IdentifierPayload, IdentifierResult, PlacekeyClient};

/// A successfully encoded address.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedAddress {
    /// Geocoder result; `location.formatted_address()` is the clean address
    pub location: GeocodeResult,
    pub placekey: String,
    pub query_id: String,
}

/// Encodes free-text addresses as Placekeys.
///
/// POI names improve precision: with a name, Placekey can return the key of a
/// particular store at an address instead of the address alone.
pub struct AddressNormalizer {
    geocoder: Geocoder,
    placekey: PlacekeyClient,
}

impl AddressNormalizer {
    pub fn new(geocoder: Geocoder, placekey: PlacekeyClient) -> Self {
        Self { geocoder, placekey }
    }

    /// Builds both API clients from the configuration, sharing one HTTP client
    /// and one geocoder rate limiter.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = init_client(config).context("Failed to initialize HTTP client")?;
        let rate_limiter = init_rate_limiter(config.geocode_min_delay);

        let geocoder = Geocoder::new(
            client.clone(),
            &config.geocoder_base_url,
            config.credentials.mapbox_token.clone(),
            rate_limiter,
        )
        .context("Failed to initialize geocoder")?;
        let placekey = PlacekeyClient::new(
            client,
            &config.placekey_base_url,
            config.credentials.placekey_api_key.clone(),
        )
        .context("Failed to initialize Placekey client")?;

        Ok(Self::new(geocoder, placekey))
    }

    /// Geocodes `address` and looks up its Placekey.
    ///
    /// `hint` is a POI name for the address. It fills in a missing name, and
    /// replaces the geocoder's name when `prefer_hint` is set.
    ///
    /// If Placekey rejects the query, it is rebuilt from the geocoder's formatted
    /// address and looked up once more. A result without a complete street line
    /// goes straight to the rebuilt query. At most two lookups are made.
    ///
    /// # Errors
    ///
    /// - `EncodeError::Geocode` if geocoding fails or its result cannot be mapped
    ///   (no lookup is made)
    /// - `EncodeError::Mapping` if the fallback parser cannot handle the address
    /// - `EncodeError::Lookup` on Placekey transport failures
    /// - `EncodeError::IdentifierNotFound` if every lookup made is rejected
    pub async fn encode(
        &self,
        address: &str,
        hint: Option<&str>,
        prefer_hint: bool,
    ) -> Result<EncodedAddress, EncodeError> {
        let location = self.geocoder.geocode(address).await.map_err(|e| {
            if let GeocodeError::Mapping(ref mapping) = e {
                error!("Could not parse raw geocoder result for {:?}: {}", address, mapping);
            }
            e
        })?;

        let first = match to_payload(&location, hint, prefer_hint) {
            Some(payload) => match self.placekey.lookup(&payload).await? {
                IdentifierResult::Found { placekey, query_id } => {
                    return Ok(EncodedAddress {
                        location,
                        placekey,
                        query_id,
                    })
                }
                IdentifierResult::Rejected { error, .. } => {
                    warn!(
                        "Placekey not found for address {} {} (1st attempt)",
                        payload_json(&payload),
                        error
                    );
                    Some(Box::new(LookupAttempt { payload, error }))
                }
            },
            None => {
                info!(
                    "No street line in geocoder result {:?}, querying by formatted address",
                    location.formatted_address()
                );
                None
            }
        };

        let fallback = parse_from_address_string(&location)?;
        match self.placekey.lookup(&fallback).await? {
            IdentifierResult::Found { placekey, query_id } => Ok(EncodedAddress {
                location,
                placekey,
                query_id,
            }),
            IdentifierResult::Rejected { error, .. } => Err(EncodeError::IdentifierNotFound {
                address: address.to_string(),
                first,
                second: Box::new(LookupAttempt {
                    payload: fallback,
                    error,
                }),
            }),
        }
    }
}

fn payload_json(payload: &IdentifierPayload) -> String {
    serde_json::to_string(payload).unwrap_or_else(|_| format!("{:?}", payload))
}
