//! UI rendering module
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod search;
pub mod weather_view;

pub use search::render as render_search;
pub use weather_view::render as render_weather;
