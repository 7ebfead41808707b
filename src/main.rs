//! skycast - Current weather in your terminal
//!
//! A terminal UI application that shows current conditions for a searched
//! place, or for the position detected from the public IP at startup.

use std::io;
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skycast::app::App;
use skycast::cli::{Cli, StartupConfig};
use skycast::config::Config;
use skycast::fetch;
use skycast::ui;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Renders the UI: search bar on top, result panel below, key hints at the bottom
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(0),    // Result panel
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    ui::render_search(frame, chunks[0], app);
    ui::render_weather(frame, chunks[1], app);
    render_key_hints(frame, chunks[2]);
}

/// Renders the key hint line
fn render_key_hints(frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
    use ratatui::{
        style::{Color, Style},
        widgets::Paragraph,
    };

    let hints =
        Paragraph::new("Enter: search  Esc: quit").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, area);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present; running without one is fine
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skycast=warn")),
        )
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    // Validate arguments and configuration before touching the terminal so
    // failures print as plain messages
    let startup = match StartupConfig::from_cli(&cli) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut fetch_handle) = fetch::channel();
    let mut app = App::new(&config, tx);

    // Kick off the first fetch
    match startup.initial_query {
        Some(query) => app.search(query),
        None if startup.detect_position => app.detect_and_fetch(),
        None => app.fetch_fallback(),
    }

    // Main event loop
    loop {
        // Render UI
        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Apply any fetches that settled since the last pass
        while let Some(message) = fetch::try_recv(&mut fetch_handle) {
            app.handle_fetch_message(message);
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
