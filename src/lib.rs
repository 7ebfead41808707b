//! skycast library
//!
//! Terminal weather lookup: search for a place by name, or let the app
//! detect a position from the public IP, and show the current conditions.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod fetch;
pub mod format;
pub mod ui;
