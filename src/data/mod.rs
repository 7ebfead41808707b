//! Core data models and API clients
//!
//! This module contains the types shared across the fetch flows: queries,
//! resolved locations, the weather snapshot the UI renders, and the error
//! taxonomy every request settles into.

pub mod geocode;
pub mod locate;
pub mod weather;

pub use geocode::GeocodeClient;
pub use locate::{GeoLocator, LocateError, Position};
pub use weather::WeatherClient;

use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Per-request timeout applied by every client
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Base URL for condition icons; the snapshot exposes the composed URL
const ICON_URL_BASE: &str = "https://openweathermap.org/img/wn";

/// Input to a weather fetch: a place name or a coordinate pair,
/// never both
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    /// Fetch by coordinates
    Coords { lat: f64, lon: f64 },
    /// Fetch by place name
    Place(String),
}

/// A place name resolved to coordinates by the geocoding endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    /// Canonical place name reported by the resolver
    pub name: String,
    /// Country code, when reported
    pub country: Option<String>,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

impl ResolvedLocation {
    /// The coordinate query for this location
    pub fn query(&self) -> WeatherQuery {
        WeatherQuery::Coords {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// One successful weather reading.
///
/// A snapshot is immutable and replaced wholesale by the next successful
/// fetch; fields the upstream omitted are `None` and render as "N/A",
/// never as a value carried over from an earlier snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Place name reported with the reading
    pub place: Option<String>,
    /// Country code
    pub country: Option<String>,
    /// Condition description, e.g. "broken clouds"
    pub description: Option<String>,
    /// Condition icon code, e.g. "04d"
    pub icon: Option<String>,
    /// Temperature in Celsius
    pub temperature: Option<f64>,
    /// Feels-like temperature in Celsius
    pub feels_like: Option<f64>,
    /// Relative humidity percentage (0-100)
    pub humidity: Option<u8>,
    /// Pressure in hPa
    pub pressure: Option<u32>,
    /// Wind speed in m/s
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees
    pub wind_deg: Option<f64>,
    /// Visibility in meters
    pub visibility: Option<u32>,
    /// Sunrise as epoch seconds (UTC)
    pub sunrise: Option<i64>,
    /// Sunset as epoch seconds (UTC)
    pub sunset: Option<i64>,
    /// Offset from UTC in seconds at the location
    pub utc_offset: Option<i64>,
    /// When this data was fetched
    pub fetched_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    /// URL of the condition icon image, when an icon code is present
    pub fn icon_url(&self) -> Option<String> {
        self.icon
            .as_ref()
            .map(|code| format!("{ICON_URL_BASE}/{code}@2x.png"))
    }
}

/// How a weather or geocoding request can fail.
///
/// The `Display` strings are shown to the user as-is. Transport errors are
/// carried as text rather than the underlying `reqwest::Error` so the whole
/// request state stays `Clone + PartialEq`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The place is unknown: HTTP 404, or a geocode with zero matches
    #[error("Location not found")]
    LocationNotFound,

    /// Any other non-success status from the upstream service
    #[error("Weather service error (HTTP {status})")]
    UpstreamStatus { status: u16 },

    /// A success response whose body did not have the expected shape
    #[error("Unexpected response from weather service: {0}")]
    MalformedResponse(String),

    /// DNS, connection, or timeout trouble before a response arrived
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Network("request timed out".to_string())
        } else if err.is_connect() {
            FetchError::Network("could not reach the service".to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::MalformedResponse(err.to_string())
    }
}
