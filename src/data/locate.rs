//! IP-based position detection
//!
//! Asks ip-api.com where the current public IP appears to be. The answer is
//! only good enough to seed the first weather fetch, so every failure mode
//! maps to a small error the caller can fall back from. The lookup runs at
//! most once per program start and is never retried.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::REQUEST_TIMEOUT;

/// Default base URL for the position lookup service
const DEFAULT_LOCATE_URL: &str = "http://ip-api.com";

/// Errors from the position lookup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocateError {
    /// The service answered but declined to place the caller
    #[error("position lookup refused: {0}")]
    Refused(String),
    /// The service could not be reached or answered unusably
    #[error("position service unavailable: {0}")]
    Unavailable(String),
}

/// A detected geographic position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Client for the ip-api.com position lookup
#[derive(Debug, Clone)]
pub struct GeoLocator {
    client: Client,
    base_url: String,
}

impl GeoLocator {
    /// Create a new GeoLocator talking to the production endpoint
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_LOCATE_URL.to_string(),
        }
    }

    /// Create a GeoLocator with a custom base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Look up the position of the current public IP.
    ///
    /// # Returns
    /// * `Ok(Position)` - the detected coordinates
    /// * `Err(LocateError::Refused)` - the service declined the lookup
    /// * `Err(LocateError::Unavailable)` - transport failure or unusable answer
    pub async fn locate(&self) -> Result<Position, LocateError> {
        let url = format!("{}/json", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| LocateError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LocateError::Unavailable(format!("HTTP {}", status.as_u16())));
        }

        let payload: IpApiResponse = response
            .json()
            .await
            .map_err(|e| LocateError::Unavailable(e.to_string()))?;

        let position = position_from(payload)?;
        tracing::debug!(
            latitude = position.latitude,
            longitude = position.longitude,
            "position detected"
        );
        Ok(position)
    }
}

impl Default for GeoLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn an ip-api payload into a position, rejecting unsuccessful lookups
fn position_from(payload: IpApiResponse) -> Result<Position, LocateError> {
    if payload.status != "success" {
        let message = payload
            .message
            .unwrap_or_else(|| "lookup failed".to_string());
        return Err(LocateError::Refused(message));
    }

    match (payload.lat, payload.lon) {
        (Some(latitude), Some(longitude)) => Ok(Position {
            latitude,
            longitude,
        }),
        _ => Err(LocateError::Refused(
            "response carried no coordinates".to_string(),
        )),
    }
}

/// ip-api.com response, reduced to the fields this app consumes
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}
