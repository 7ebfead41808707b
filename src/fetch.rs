//! Background fetch tasks
//!
//! Runs weather lookups on spawned tokio tasks and reports their outcome
//! back to the main application over an mpsc channel. Every message carries
//! the generation number of the request that produced it, so the app can
//! discard answers that a newer request has already superseded.

use tokio::sync::mpsc;

use crate::data::{
    FetchError, GeoLocator, GeocodeClient, WeatherClient, WeatherQuery, WeatherSnapshot,
};

/// Messages sent from fetch tasks to the main app
#[derive(Debug, Clone)]
pub enum FetchMessage {
    /// A fetch finished, successfully or not
    Settled {
        /// Generation of the request this outcome belongs to
        generation: u64,
        outcome: Result<WeatherSnapshot, FetchError>,
    },
}

/// Handle for receiving fetch outcomes
pub struct FetchHandle {
    /// Channel for receiving fetch messages
    pub receiver: mpsc::Receiver<FetchMessage>,
}

/// Creates the channel pair connecting fetch tasks to the main app
pub fn channel() -> (mpsc::Sender<FetchMessage>, FetchHandle) {
    let (tx, rx) = mpsc::channel(16);
    (tx, FetchHandle { receiver: rx })
}

/// Checks for a pending fetch message without blocking
///
/// # Arguments
/// * `handle` - The FetchHandle to check
///
/// # Returns
/// * `Some(FetchMessage)` if a message was available
/// * `None` if no messages are pending
pub fn try_recv(handle: &mut FetchHandle) -> Option<FetchMessage> {
    handle.receiver.try_recv().ok()
}

/// Resolve a place name and fetch its current weather.
///
/// The geocoder picks the best match for the name; the weather request then
/// goes out by coordinates, so the reading matches the resolved place rather
/// than whatever the weather endpoint would guess from the raw text.
pub async fn run_search(
    weather: &WeatherClient,
    geocode: &GeocodeClient,
    place: &str,
) -> Result<WeatherSnapshot, FetchError> {
    let location = geocode.resolve(place).await?;
    tracing::debug!(
        name = %location.name,
        lat = location.lat,
        lon = location.lon,
        "place resolved"
    );
    weather.fetch_current(&location.query()).await
}

/// Detect the current position and fetch weather for it.
///
/// When detection fails the fallback place is fetched by name instead.
/// Either way exactly one weather request goes out.
pub async fn run_detect(
    weather: &WeatherClient,
    locator: &GeoLocator,
    fallback_place: &str,
) -> Result<WeatherSnapshot, FetchError> {
    let query = match locator.locate().await {
        Ok(position) => WeatherQuery::Coords {
            lat: position.latitude,
            lon: position.longitude,
        },
        Err(e) => {
            tracing::debug!(error = %e, fallback = fallback_place, "position detection failed");
            WeatherQuery::Place(fallback_place.to_string())
        }
    };
    weather.fetch_current(&query).await
}

/// Spawns a search fetch; sends exactly one Settled message when it finishes
pub fn spawn_search(
    weather: WeatherClient,
    geocode: GeocodeClient,
    place: String,
    generation: u64,
    tx: mpsc::Sender<FetchMessage>,
) {
    tokio::spawn(async move {
        let outcome = run_search(&weather, &geocode, &place).await;
        let _ = tx.send(FetchMessage::Settled { generation, outcome }).await;
    });
}

/// Spawns a detect-then-fetch; sends exactly one Settled message when it finishes
pub fn spawn_detect(
    weather: WeatherClient,
    locator: GeoLocator,
    fallback_place: String,
    generation: u64,
    tx: mpsc::Sender<FetchMessage>,
) {
    tokio::spawn(async move {
        let outcome = run_detect(&weather, &locator, &fallback_place).await;
        let _ = tx.send(FetchMessage::Settled { generation, outcome }).await;
    });
}

/// Spawns a fetch for a place by name, skipping geocoding and detection
pub fn spawn_place(
    weather: WeatherClient,
    place: String,
    generation: u64,
    tx: mpsc::Sender<FetchMessage>,
) {
    tokio::spawn(async move {
        let outcome = weather.fetch_current(&WeatherQuery::Place(place)).await;
        let _ = tx.send(FetchMessage::Settled { generation, outcome }).await;
    });
}
