//! Application state management
//!
//! This module contains the main application state, handling keyboard input,
//! search submission, and settlement of background weather fetches.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::data::{FetchError, GeoLocator, GeocodeClient, WeatherClient, WeatherSnapshot};
use crate::fetch::{self, FetchMessage};

/// Lifecycle of the weather request currently reflected on screen.
///
/// Exactly one variant holds at any time. While a request is in flight the
/// state is `Loading` regardless of what was on screen before, so a stale
/// result can never show alongside a newer pending request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    /// Nothing requested yet
    Idle,
    /// A request is in flight
    Loading,
    /// The most recent request produced a snapshot
    Success(WeatherSnapshot),
    /// The most recent request failed
    Failed(FetchError),
}

/// Main application struct managing state and input
pub struct App {
    /// Current request state driving the result panel
    pub state: RequestState,
    /// Text in the search bar
    pub input: String,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Timestamp of the last successful fetch
    pub last_updated: Option<DateTime<Local>>,
    /// Place fetched when position detection is skipped or fails
    fallback_place: String,
    /// Generation of the most recent request; older settlements are discarded
    generation: u64,
    /// Sender handed to spawned fetch tasks
    tx: mpsc::Sender<FetchMessage>,
    /// Current weather API client
    weather_client: WeatherClient,
    /// Geocoding API client
    geocode_client: GeocodeClient,
    /// IP position lookup client
    locator: GeoLocator,
}

impl App {
    /// Creates a new App with clients built from the given configuration
    pub fn new(config: &Config, tx: mpsc::Sender<FetchMessage>) -> Self {
        let weather_client = WeatherClient::new(config.api_key.clone())
            .with_base_url(config.weather_base_url.clone());
        let geocode_client = GeocodeClient::new(config.api_key.clone())
            .with_base_url(config.geocode_base_url.clone());
        let locator = GeoLocator::new().with_base_url(config.locate_base_url.clone());

        Self {
            state: RequestState::Idle,
            input: String::new(),
            should_quit: false,
            last_updated: None,
            fallback_place: config.default_place.clone(),
            generation: 0,
            tx,
            weather_client,
            geocode_client,
            locator,
        }
    }

    /// Creates a new App with custom clients (for testing)
    #[cfg(test)]
    pub fn with_clients(
        weather_client: WeatherClient,
        geocode_client: GeocodeClient,
        locator: GeoLocator,
        tx: mpsc::Sender<FetchMessage>,
    ) -> Self {
        Self {
            state: RequestState::Idle,
            input: String::new(),
            should_quit: false,
            last_updated: None,
            fallback_place: "London".to_string(),
            generation: 0,
            tx,
            weather_client,
            geocode_client,
            locator,
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Arguments
    /// * `key_event` - The keyboard event to handle
    ///
    /// # Key Bindings
    /// - `Esc` or `Ctrl+C`: Quit the application
    /// - `Enter`: Submit the search bar text
    /// - `Backspace`: Delete the last character of the search bar
    /// - Any other character: Append to the search bar
    ///
    /// Typing stays live while a request is in flight.
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            if key_event.code == KeyCode::Char('c') {
                self.should_quit = true;
            }
            return;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Enter => {
                self.submit_search();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    /// Submits the search bar text.
    ///
    /// A blank submission is rejected on the spot: no request goes out and
    /// the request state does not change.
    fn submit_search(&mut self) {
        let place = self.input.trim();
        if place.is_empty() {
            return;
        }
        self.search(place.to_string());
    }

    /// Starts a search fetch for the given place name
    pub fn search(&mut self, place: String) {
        let generation = self.begin_request();
        fetch::spawn_search(
            self.weather_client.clone(),
            self.geocode_client.clone(),
            place,
            generation,
            self.tx.clone(),
        );
    }

    /// Starts a position-detection fetch, falling back to the default place
    pub fn detect_and_fetch(&mut self) {
        let generation = self.begin_request();
        fetch::spawn_detect(
            self.weather_client.clone(),
            self.locator.clone(),
            self.fallback_place.clone(),
            generation,
            self.tx.clone(),
        );
    }

    /// Starts a fetch for the default place without detecting the position
    pub fn fetch_fallback(&mut self) {
        let generation = self.begin_request();
        fetch::spawn_place(
            self.weather_client.clone(),
            self.fallback_place.clone(),
            generation,
            self.tx.clone(),
        );
    }

    /// Applies a settled fetch outcome to the application state.
    ///
    /// Outcomes of superseded requests are discarded; only the settlement of
    /// the current generation replaces the state and clears the search bar.
    pub fn handle_fetch_message(&mut self, message: FetchMessage) {
        let FetchMessage::Settled {
            generation,
            outcome,
        } = message;

        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding superseded fetch outcome"
            );
            return;
        }

        match outcome {
            Ok(snapshot) => {
                self.last_updated = Some(Local::now());
                self.state = RequestState::Success(snapshot);
            }
            Err(e) => {
                self.state = RequestState::Failed(e);
            }
        }
        self.input.clear();
    }

    /// Advances to a new request generation and enters the loading state
    fn begin_request(&mut self) -> u64 {
        self.generation += 1;
        self.state = RequestState::Loading;
        self.generation
    }
}
