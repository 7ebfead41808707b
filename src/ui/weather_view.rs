//! Weather result panel UI
//!
//! Renders the outcome of the current weather request: a hint before the
//! first search, a notice while a fetch is in flight, the readings of the
//! latest snapshot, or the error that ended the latest attempt.

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, RequestState};
use crate::data::WeatherSnapshot;
use crate::format::{local_time_of_epoch, or_na, or_na_f64, wind_direction};

/// Color scheme for the result panel
mod colors {
    use ratatui::style::Color;

    /// Panel border and place header
    pub const HEADER: Color = Color::Cyan;
    /// Reading values
    pub const PRIMARY: Color = Color::White;
    /// Reading labels
    pub const LABEL: Color = Color::Gray;
    /// Failure messages
    pub const ERROR: Color = Color::Red;
    /// Hints and transient notices
    pub const DIM: Color = Color::DarkGray;
}

/// Renders the weather result panel
///
/// # Arguments
/// * `frame` - The ratatui frame to render into
/// * `area` - The area reserved for the panel
/// * `app` - The application state
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(Span::styled(
            " Current Weather ",
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));

    let lines = match &app.state {
        RequestState::Idle => vec![Line::from(Span::styled(
            "Type a city name and press Enter",
            Style::default().fg(colors::DIM),
        ))],
        RequestState::Loading => vec![Line::from(Span::styled(
            "Fetching current weather...",
            Style::default().fg(colors::DIM),
        ))],
        RequestState::Success(snapshot) => snapshot_lines(snapshot, app.last_updated),
        RequestState::Failed(e) => vec![
            Line::from(Span::styled(
                e.to_string(),
                Style::default().fg(colors::ERROR),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Try another search.",
                Style::default().fg(colors::DIM),
            )),
        ],
    };

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Builds the reading lines for a snapshot
fn snapshot_lines(
    snapshot: &WeatherSnapshot,
    last_updated: Option<DateTime<Local>>,
) -> Vec<Line<'static>> {
    let place = match (&snapshot.place, &snapshot.country) {
        (Some(place), Some(country)) => format!("{place}, {country}"),
        (Some(place), None) => place.clone(),
        (None, _) => "Unknown location".to_string(),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            place,
            Style::default()
                .fg(colors::HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    lines.push(field_line(
        "Conditions",
        snapshot
            .description
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
    ));
    lines.push(field_line(
        "Icon",
        snapshot.icon_url().unwrap_or_else(|| "N/A".to_string()),
    ));
    lines.push(field_line(
        "Temperature",
        or_na_f64(snapshot.temperature, " °C"),
    ));
    lines.push(field_line(
        "Feels Like",
        or_na_f64(snapshot.feels_like, " °C"),
    ));
    lines.push(field_line("Humidity", or_na(snapshot.humidity, "%")));
    lines.push(field_line("Pressure", or_na(snapshot.pressure, " hPa")));
    lines.push(field_line(
        "Wind Speed",
        or_na_f64(snapshot.wind_speed, " m/s"),
    ));
    lines.push(field_line(
        "Wind Direction",
        snapshot
            .wind_deg
            .map(wind_direction)
            .unwrap_or("N/A")
            .to_string(),
    ));
    lines.push(field_line("Visibility", or_na(snapshot.visibility, " m")));
    lines.push(field_line(
        "Sunrise",
        local_time_of_epoch(snapshot.sunrise, snapshot.utc_offset),
    ));
    lines.push(field_line(
        "Sunset",
        local_time_of_epoch(snapshot.sunset, snapshot.utc_offset),
    ));

    if let Some(updated) = last_updated {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Updated {}", updated.format("%H:%M:%S")),
            Style::default().fg(colors::DIM),
        )));
    }

    lines
}

/// Builds one labeled reading line
fn field_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().fg(colors::LABEL),
        ),
        Span::styled(value, Style::default().fg(colors::PRIMARY)),
    ])
}
