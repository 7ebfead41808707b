//! OpenWeatherMap geocoding client
//!
//! Resolves a free-form place name to coordinates through the
//! `/direct` geocoding endpoint. Only the first candidate is used;
//! an empty candidate list means the place does not exist as far as
//! the upstream is concerned.

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{FetchError, ResolvedLocation, REQUEST_TIMEOUT};

/// Default base URL for the geocoding endpoint
const DEFAULT_GEOCODE_URL: &str = "https://api.openweathermap.org/geo/1.0";

/// Client for the OpenWeatherMap direct geocoding endpoint.
///
/// No `Debug` impl: the client holds the API key.
#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    /// Create a new GeocodeClient talking to the production endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_GEOCODE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Create a GeocodeClient with a custom base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve a place name to its best-matching location.
    ///
    /// # Returns
    /// * `Ok(ResolvedLocation)` - the first geocoding candidate
    /// * `Err(FetchError::LocationNotFound)` - no candidate matched
    /// * `Err(FetchError::UpstreamStatus)` - non-success status
    /// * `Err(FetchError::Network)` - the request never produced a response
    pub async fn resolve(&self, place: &str) -> Result<ResolvedLocation, FetchError> {
        let url = format!("{}/direct", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("q", place), ("limit", "1"), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::LocationNotFound);
        }
        if !status.is_success() {
            return Err(FetchError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let candidates: Vec<GeocodeCandidate> = serde_json::from_str(&text)?;
        first_match(candidates)
    }
}

/// Pick the first geocoding candidate, or report the place as unknown
fn first_match(candidates: Vec<GeocodeCandidate>) -> Result<ResolvedLocation, FetchError> {
    let candidate = candidates
        .into_iter()
        .next()
        .ok_or(FetchError::LocationNotFound)?;

    Ok(ResolvedLocation {
        name: candidate.name,
        country: candidate.country,
        lat: candidate.lat,
        lon: candidate.lon,
    })
}

/// One candidate from the direct geocoding endpoint
#[derive(Debug, Deserialize)]
struct GeocodeCandidate {
    name: String,
    lat: f64,
    lon: f64,
    country: Option<String>,
}
