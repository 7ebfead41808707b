//! OpenWeatherMap current weather client
//!
//! Fetches current conditions for a place name or a coordinate pair and
//! parses the response into a [`WeatherSnapshot`]. Only the HTTP status and
//! the presence of a conditions entry are hard requirements; any other field
//! the upstream omits becomes `None` in the snapshot.

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{FetchError, WeatherQuery, WeatherSnapshot, REQUEST_TIMEOUT};

/// Default base URL for the current weather endpoint
const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Units requested from the API; temperatures in Celsius, wind in m/s
const UNITS: &str = "metric";

/// Client for the OpenWeatherMap current weather endpoint.
///
/// No `Debug` impl: the client holds the API key.
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    /// Create a new WeatherClient talking to the production endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_WEATHER_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Create a WeatherClient with a custom base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch current weather for the given query.
    ///
    /// # Returns
    /// * `Ok(WeatherSnapshot)` - parsed current conditions
    /// * `Err(FetchError::LocationNotFound)` - the upstream answered 404
    /// * `Err(FetchError::UpstreamStatus)` - any other non-success status
    /// * `Err(FetchError::MalformedResponse)` - 2xx body without the expected shape
    /// * `Err(FetchError::Network)` - the request never produced a response
    pub async fn fetch_current(&self, query: &WeatherQuery) -> Result<WeatherSnapshot, FetchError> {
        let url = format!("{}/weather", self.base_url);
        let request = self.client.get(&url).timeout(REQUEST_TIMEOUT);

        let request = match query {
            WeatherQuery::Coords { lat, lon } => {
                request.query(&[("lat", lat.to_string()), ("lon", lon.to_string())])
            }
            WeatherQuery::Place(name) => request.query(&[("q", name.clone())]),
        };

        let response = request
            .query(&[("appid", self.api_key.as_str()), ("units", UNITS)])
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
        self.parse_snapshot(&text)
    }

    /// Parse a current weather response body into a snapshot.
    ///
    /// A body that does not deserialize, or deserializes without at least
    /// one conditions entry, is a [`FetchError::MalformedResponse`].
    fn parse_snapshot(&self, body: &str) -> Result<WeatherSnapshot, FetchError> {
        let response: CurrentWeatherResponse = serde_json::from_str(body)?;

        let condition = response.weather.into_iter().next().ok_or_else(|| {
            FetchError::MalformedResponse("no weather conditions entry".to_string())
        })?;

        let main = response.main;
        let wind = response.wind;
        let sys = response.sys;

        Ok(WeatherSnapshot {
            place: response.name,
            country: sys.as_ref().and_then(|s| s.country.clone()),
            description: condition.description,
            icon: condition.icon,
            temperature: main.as_ref().and_then(|m| m.temp),
            feels_like: main.as_ref().and_then(|m| m.feels_like),
            humidity: main.as_ref().and_then(|m| m.humidity),
            pressure: main.as_ref().and_then(|m| m.pressure),
            wind_speed: wind.as_ref().and_then(|w| w.speed),
            wind_deg: wind.as_ref().and_then(|w| w.deg),
            visibility: response.visibility,
            sunrise: sys.as_ref().and_then(|s| s.sunrise),
            sunset: sys.as_ref().and_then(|s| s.sunset),
            utc_offset: response.timezone,
            fetched_at: Utc::now(),
        })
    }
}

/// Current weather response, reduced to the fields this app consumes
#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    name: Option<String>,
    timezone: Option<i64>,
    visibility: Option<u32>,
    #[serde(default)]
    weather: Vec<ConditionEntry>,
    main: Option<MainReadings>,
    wind: Option<WindReadings>,
    sys: Option<SysBlock>,
}

/// One entry of the `weather` conditions list
#[derive(Debug, Deserialize)]
struct ConditionEntry {
    description: Option<String>,
    icon: Option<String>,
}

/// The `main` block: thermal and pressure readings
#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<u8>,
    pressure: Option<u32>,
}

/// The `wind` block
#[derive(Debug, Deserialize)]
struct WindReadings {
    speed: Option<f64>,
    deg: Option<f64>,
}

/// The `sys` block: country and sun times
#[derive(Debug, Deserialize)]
struct SysBlock {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample current weather response for London
    const VALID_RESPONSE: &str = r#"{
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [
            {"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}
        ],
        "base": "stations",
        "main": {
            "temp": 18.4,
            "feels_like": 18.1,
            "temp_min": 16.9,
            "temp_max": 19.6,
            "pressure": 1012,
            "humidity": 72
        },
        "visibility": 10000,
        "wind": {"speed": 4.12, "deg": 250},
        "clouds": {"all": 75},
        "dt": 1661870592,
        "sys": {
            "type": 2,
            "id": 2075535,
            "country": "GB",
            "sunrise": 1661834187,
            "sunset": 1661882248
        },
        "timezone": 3600,
        "id": 2643743,
        "name": "London",
        "cod": 200
    }"#;

    #[test]
    fn test_parse_valid_response() {
        let client = WeatherClient::new("test-key");
        let snapshot = client
            .parse_snapshot(VALID_RESPONSE)
            .expect("Failed to parse snapshot");

        assert_eq!(snapshot.place.as_deref(), Some("London"));
        assert_eq!(snapshot.country.as_deref(), Some("GB"));
        assert_eq!(snapshot.description.as_deref(), Some("broken clouds"));
        assert_eq!(snapshot.icon.as_deref(), Some("04d"));
        assert!((snapshot.temperature.unwrap() - 18.4).abs() < 0.01);
        assert!((snapshot.feels_like.unwrap() - 18.1).abs() < 0.01);
        assert_eq!(snapshot.humidity, Some(72));
        assert_eq!(snapshot.pressure, Some(1012));
        assert!((snapshot.wind_speed.unwrap() - 4.12).abs() < 0.01);
        assert!((snapshot.wind_deg.unwrap() - 250.0).abs() < 0.01);
        assert_eq!(snapshot.visibility, Some(10000));
        assert_eq!(snapshot.sunrise, Some(1661834187));
        assert_eq!(snapshot.sunset, Some(1661882248));
        assert_eq!(snapshot.utc_offset, Some(3600));
    }

    #[test]
    fn test_parse_valid_response_icon_url() {
        let client = WeatherClient::new("test-key");
        let snapshot = client
            .parse_snapshot(VALID_RESPONSE)
            .expect("Failed to parse snapshot");

        assert_eq!(
            snapshot.icon_url().as_deref(),
            Some("https://openweathermap.org/img/wn/04d@2x.png")
        );
    }

    #[test]
    fn test_parse_empty_conditions_list_is_malformed() {
        let body = r#"{
            "weather": [],
            "main": {"temp": 18.4, "feels_like": 18.1, "pressure": 1012, "humidity": 72},
            "name": "London"
        }"#;

        let client = WeatherClient::new("test-key");
        let result = client.parse_snapshot(body);

        match result {
            Err(FetchError::MalformedResponse(msg)) => {
                assert!(msg.contains("conditions"));
            }
            other => panic!("Expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_missing_conditions_key_is_malformed() {
        let body = r#"{
            "main": {"temp": 18.4, "feels_like": 18.1, "pressure": 1012, "humidity": 72},
            "name": "London"
        }"#;

        let client = WeatherClient::new("test-key");
        assert!(matches!(
            client.parse_snapshot(body),
            Err(FetchError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_malformed_json() {
        let client = WeatherClient::new("test-key");
        assert!(matches!(
            client.parse_snapshot("{ invalid json }"),
            Err(FetchError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_conditions_as_object_is_malformed() {
        // The conditions list must be a list, not a single object
        let body = r#"{
            "weather": {"description": "mist", "icon": "50n"},
            "name": "London"
        }"#;

        let client = WeatherClient::new("test-key");
        assert!(matches!(
            client.parse_snapshot(body),
            Err(FetchError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_partial_response_leaves_fields_unknown() {
        let body = r#"{
            "weather": [{"description": "mist", "icon": "50n"}],
            "name": "London"
        }"#;

        let client = WeatherClient::new("test-key");
        let snapshot = client
            .parse_snapshot(body)
            .expect("Partial body should still parse");

        assert_eq!(snapshot.place.as_deref(), Some("London"));
        assert_eq!(snapshot.description.as_deref(), Some("mist"));
        assert!(snapshot.country.is_none());
        assert!(snapshot.temperature.is_none());
        assert!(snapshot.feels_like.is_none());
        assert!(snapshot.humidity.is_none());
        assert!(snapshot.pressure.is_none());
        assert!(snapshot.wind_speed.is_none());
        assert!(snapshot.wind_deg.is_none());
        assert!(snapshot.visibility.is_none());
        assert!(snapshot.sunrise.is_none());
        assert!(snapshot.sunset.is_none());
        assert!(snapshot.utc_offset.is_none());
    }

    #[test]
    fn test_parse_bare_conditions_entry() {
        // An entry without description or icon is tolerated
        let body = r#"{"weather": [{"id": 800}], "name": "London"}"#;

        let client = WeatherClient::new("test-key");
        let snapshot = client
            .parse_snapshot(body)
            .expect("Bare entry should still parse");

        assert!(snapshot.description.is_none());
        assert!(snapshot.icon.is_none());
        assert!(snapshot.icon_url().is_none());
    }

    #[test]
    fn test_first_conditions_entry_wins() {
        let body = r#"{
            "weather": [
                {"description": "light rain", "icon": "10d"},
                {"description": "mist", "icon": "50d"}
            ],
            "name": "London"
        }"#;

        let client = WeatherClient::new("test-key");
        let snapshot = client.parse_snapshot(body).expect("Failed to parse");

        assert_eq!(snapshot.description.as_deref(), Some("light rain"));
        assert_eq!(snapshot.icon.as_deref(), Some("10d"));
    }

    #[test]
    fn test_client_default_base_url() {
        let client = WeatherClient::new("test-key");
        assert_eq!(client.base_url, DEFAULT_WEATHER_URL);
    }

    #[test]
    fn test_client_with_base_url() {
        let client = WeatherClient::new("test-key").with_base_url("http://127.0.0.1:8080");
        assert_eq!(client.base_url, "http://127.0.0.1:8080");
    }
}
