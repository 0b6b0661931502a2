//! Placekey API client.

use std::sync::Arc;

use reqwest::StatusCode;
use url::Url;

use super::types::{IdentifierPayload, IdentifierResult, LookupRequest, LookupResponse};
use crate::config::PLACEKEY_LOOKUP_PATH;
use crate::error_handling::LookupError;

/// Client for the Placekey single-lookup endpoint.
///
/// No retries and no local rate limiting: a rejected query comes back as
/// [`IdentifierResult::Rejected`], anything else that goes wrong as a [`LookupError`].
pub struct PlacekeyClient {
    client: Arc<reqwest::Client>,
    lookup_url: Url,
    api_key: String,
}

impl PlacekeyClient {
    /// Creates a client for the Placekey API at `base_url`.
    ///
    /// Any path on `base_url` is kept as a prefix of the lookup path.
    ///
    /// # Errors
    ///
    /// Returns a `url::ParseError` if `base_url` is not an absolute hierarchical URL.
    pub fn new(
        client: Arc<reqwest::Client>,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, url::ParseError> {
        let mut lookup_url = Url::parse(base_url)?;
        lookup_url
            .path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(PLACEKEY_LOOKUP_PATH);
        Ok(Self {
            client,
            lookup_url,
            api_key: api_key.into(),
        })
    }

    /// Looks up the Placekey for one normalized query.
    ///
    /// 2xx, 400 and 404 responses carry either a placekey or an error message and
    /// are returned as an [`IdentifierResult`].
    ///
    /// # Errors
    ///
    /// - `LookupError::Transport` on network failure
    /// - `LookupError::Status` for authentication, throttling and server errors
    /// - `LookupError::UnexpectedBody` if the body has neither shape
    pub async fn lookup(&self, payload: &IdentifierPayload) -> Result<IdentifierResult, LookupError> {
        let response = self
            .client
            .post(self.lookup_url.clone())
            .header("apikey", self.api_key.as_str())
            .json(&LookupRequest { query: payload })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !carries_result(status) {
            return Err(LookupError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: LookupResponse =
            serde_json::from_str(&body).map_err(|_| LookupError::UnexpectedBody(body.clone()))?;
        let result = IdentifierResult::from(parsed);
        log::debug!("Placekey lookup returned {:?} (HTTP {})", result, status);
        Ok(result)
    }
}

fn carries_result(status: StatusCode) -> bool {
    status.is_success() || status == StatusCode::BAD_REQUEST || status == StatusCode::NOT_FOUND
}
