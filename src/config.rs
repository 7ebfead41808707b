//! Environment-based configuration
//!
//! All settings come from the environment, optionally seeded from a `.env`
//! file loaded in `main`. The OpenWeatherMap API key is required; everything
//! else has a default. The base URLs are overridable so tests can point the
//! clients at a local server.

use std::env;

use thiserror::Error;

/// Default base URL for the current weather endpoint
const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Default base URL for the geocoding endpoint
const DEFAULT_GEOCODE_URL: &str = "https://api.openweathermap.org/geo/1.0";

/// Default base URL for the IP position lookup
const DEFAULT_LOCATE_URL: &str = "http://ip-api.com";

/// Place fetched when position detection fails or is disabled
const DEFAULT_PLACE: &str = "London";

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The API key variable is missing or empty
    #[error("OPENWEATHER_API_KEY not set")]
    MissingApiKey,
}

/// Runtime configuration for the application.
///
/// Intentionally no `Debug` impl: `api_key` is a credential and must not
/// end up in logs or panic output.
pub struct Config {
    /// OpenWeatherMap API key, treated as an opaque credential
    pub api_key: String,
    /// Base URL for the current weather endpoint
    pub weather_base_url: String,
    /// Base URL for the geocoding endpoint
    pub geocode_base_url: String,
    /// Base URL for the IP position lookup
    pub locate_base_url: String,
    /// Place fetched when position detection fails or is disabled
    pub default_place: String,
}

impl Config {
    /// Loads configuration from the environment.
    ///
    /// # Environment variables
    /// * `OPENWEATHER_API_KEY` - required
    /// * `OPENWEATHER_WEATHER_URL` - optional weather endpoint override
    /// * `OPENWEATHER_GEOCODE_URL` - optional geocoding endpoint override
    /// * `SKYCAST_LOCATE_URL` - optional position lookup override
    /// * `SKYCAST_DEFAULT_PLACE` - optional fallback place override
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENWEATHER_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            weather_base_url: env::var("OPENWEATHER_WEATHER_URL")
                .unwrap_or_else(|_| DEFAULT_WEATHER_URL.to_string()),
            geocode_base_url: env::var("OPENWEATHER_GEOCODE_URL")
                .unwrap_or_else(|_| DEFAULT_GEOCODE_URL.to_string()),
            locate_base_url: env::var("SKYCAST_LOCATE_URL")
                .unwrap_or_else(|_| DEFAULT_LOCATE_URL.to_string()),
            default_place: env::var("SKYCAST_DEFAULT_PLACE")
                .unwrap_or_else(|_| DEFAULT_PLACE.to_string()),
        })
    }
}
