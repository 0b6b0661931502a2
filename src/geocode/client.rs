//! Mapbox forward-geocoding client.

use std::sync::Arc;

use url::Url;

use super::types::{FeatureCollection, GeocodeResult};
use crate::config::GEOCODER_PLACES_PATH;
use crate::error_handling::GeocodeError;
use crate::initialization::RateLimiter;

/// Rate-limited client for the Mapbox geocoding API.
///
/// Every request goes through the shared [`RateLimiter`], so consecutive calls are
/// spaced by at least its minimum delay regardless of which caller issues them.
pub struct Geocoder {
    client: Arc<reqwest::Client>,
    base_url: Url,
    access_token: String,
    rate_limiter: Arc<RateLimiter>,
}

impl Geocoder {
    /// Creates a geocoder for the Mapbox API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `GeocodeError::InvalidUrl` if `base_url` is not an absolute
    /// hierarchical URL.
    pub fn new(
        client: Arc<reqwest::Client>,
        base_url: &str,
        access_token: impl Into<String>,
        rate_limiter: Arc<RateLimiter>,
    ) -> Result<Self, GeocodeError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| GeocodeError::InvalidUrl(base_url.to_string()))?;
        Ok(Self {
            client,
            base_url,
            access_token: access_token.into(),
            rate_limiter,
        })
    }

    /// Builds `{base}/geocoding/v5/mapbox.places/{query}.json` with the query
    /// percent-encoded as a single path segment.
    fn places_url(&self, query: &str) -> Result<Url, GeocodeError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GeocodeError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(GEOCODER_PLACES_PATH)
            .push(&format!("{}.json", query));
        Ok(url)
    }

    /// Geocodes a free-text address and returns the best match.
    ///
    /// # Errors
    ///
    /// - `GeocodeError::NoResult` if the address is blank or the service finds nothing
    /// - `GeocodeError::Transport` / `GeocodeError::Status` for network and HTTP failures
    /// - `GeocodeError::Mapping` if the best match lacks fields its kind requires
    pub async fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        let query = address.trim();
        if query.is_empty() {
            return Err(GeocodeError::NoResult(address.to_string()));
        }

        let url = self.places_url(query)?;
        let collection = self.rate_limiter.throttle(self.fetch(url)).await?;

        let feature = collection
            .features
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoResult(address.to_string()))?;
        log::debug!(
            "Geocoded {:?} to {:?} ({:?})",
            address,
            feature.place_name,
            feature.id
        );

        Ok(GeocodeResult::try_from(feature)?)
    }

    async fn fetch(&self, url: Url) -> Result<FeatureCollection, GeocodeError> {
        let response = self
            .client
            .get(url)
            .query(&[("access_token", self.access_token.as_str()), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<FeatureCollection>().await?)
    }
}
