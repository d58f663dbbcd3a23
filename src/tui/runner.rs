//! TUI Runner
//!
//! Terminal setup/teardown and the draw/dispatch loop.

use super::app::App;
use super::events::EventHandler;
use super::render::render;
use crate::config::Config;
use crate::sink::SubmissionSink;
use crate::wizard::Submission;
use anyhow::{Context, Result};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive app until the user quits.
///
/// Returns every submission made during the session.
pub async fn run(config: &Config, sink: Box<dyn SubmissionSink>) -> Result<Vec<Submission>> {
    let mut terminal = setup_terminal().context("Failed to initialize terminal")?;

    let result = event_loop(&mut terminal, config, sink).await;

    // Restore even when the loop failed
    if let Err(e) = restore_terminal(&mut terminal) {
        tracing::error!("Failed to restore terminal: {}", e);
    }

    result
}

async fn event_loop(
    terminal: &mut Tui,
    config: &Config,
    sink: Box<dyn SubmissionSink>,
) -> Result<Vec<Submission>> {
    let mut app = App::new(&config.ui, sink);
    let mut events = EventHandler::new();
    EventHandler::start_terminal_listener(
        events.sender(),
        Duration::from_millis(config.ui.tick_rate_ms),
    );

    tracing::info!("TUI started");
    while !app.should_quit {
        terminal
            .draw(|f| render(f, &app))
            .context("Failed to draw frame")?;

        let Some(event) = events.next().await else {
            tracing::debug!("Event channel closed");
            break;
        };
        app.handle_event(event);

        // Drain whatever queued up while drawing so a fast paste or key
        // repeat does not cost one frame per event
        while !app.should_quit
            && let Some(event) = events.try_next()
        {
            app.handle_event(event);
        }
    }
    tracing::info!("TUI exiting ({} submission(s))", app.submissions.len());

    Ok(app.submissions)
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}
