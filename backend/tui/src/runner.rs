//! Terminal setup and the event loop.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use ontodash_routing::View;
use ontodash_views::{DashboardViewModel, QueryViewModel};

use crate::app::{Action, AppState};
use crate::input::handle_key_event;
use crate::render::{draw_ui, Screen};

const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Restores the terminal on every exit path, including panics unwinding
/// through the loop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Run the interactive UI until the user quits.
///
/// The dashboard stays active for the whole session so that mutations made
/// from the query view refresh it through the bus.
pub async fn run(
    dashboard: Arc<DashboardViewModel>,
    query: Arc<QueryViewModel>,
    start: View,
) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal: Terminal<CrosstermBackend<Stdout>> =
        Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let mut state = AppState::new(start);
    dashboard.activate();
    info!(view = ?start, "TUI started");

    while !state.should_quit {
        let dashboard_state = dashboard.snapshot();
        let query_state = query.snapshot();
        terminal.draw(|f| {
            draw_ui(
                f,
                &state,
                &Screen {
                    dashboard: &dashboard_state,
                    query: &query_state,
                    suggestions: query.suggested_questions(),
                },
            )
        })?;

        // Non-blocking poll; spawned fetches keep running between frames.
        if !event::poll(Duration::ZERO)? {
            tokio::time::sleep(FRAME_INTERVAL).await;
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match handle_key_event(key, &mut state, &query) {
            Action::Reload => dashboard.reload(),
            Action::Ask => {
                let query = Arc::clone(&query);
                tokio::spawn(async move {
                    query.ask().await;
                });
            }
            Action::SwitchView { from, to } => debug!(?from, ?to, "View switched"),
            Action::Quit | Action::None => {}
        }
    }

    dashboard.deactivate();
    info!("TUI stopped");
    Ok(())
}
