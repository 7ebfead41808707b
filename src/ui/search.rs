//! Search bar UI
//!
//! Renders the text input where the user types a place name. The cursor
//! tracks the end of the input so typing feels like an ordinary text field.

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Renders the search bar
///
/// # Arguments
/// * `frame` - The ratatui frame to render into
/// * `area` - The area reserved for the search bar
/// * `app` - The application state
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Search ");
    let inner = block.inner(area);

    let paragraph = Paragraph::new(Line::from(Span::raw(app.input.as_str()))).block(block);
    frame.render_widget(paragraph, area);

    // Cursor sits after the typed text, clamped to the visible width
    let cursor_x = inner
        .x
        .saturating_add(app.input.chars().count() as u16)
        .min(inner.right().saturating_sub(1));
    frame.set_cursor_position(Position::new(cursor_x, inner.y));
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    use crate::data::{GeoLocator, GeocodeClient, WeatherClient};
    use crate::fetch;

    fn test_app() -> App {
        let (tx, _handle) = fetch::channel();
        App::with_clients(
            WeatherClient::new("test-key"),
            GeocodeClient::new("test-key"),
            GeoLocator::new(),
            tx,
        )
    }

    #[test]
    fn test_render_shows_typed_input() {
        let backend = TestBackend::new(80, 3);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut app = test_app();
        app.input = "Reykjavik".to_string();

        terminal
            .draw(|frame| {
                render(frame, frame.area(), &app);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();

        assert!(content.contains("Search"), "Should render the bar title");
        assert!(content.contains("Reykjavik"), "Should render the input text");
    }

    #[test]
    fn test_render_empty_input() {
        let backend = TestBackend::new(80, 3);
        let mut terminal = Terminal::new(backend).unwrap();

        let app = test_app();

        terminal
            .draw(|frame| {
                render(frame, frame.area(), &app);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();

        assert!(content.contains("Search"));
    }
}
