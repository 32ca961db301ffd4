//! Keyboard Input Handler
//!
//! Processes crossterm key events, updates `AppState` and the query input,
//! and returns the [`Action`] the runner should carry out.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ontodash_views::QueryViewModel;
use ontodash_routing::View;

use crate::app::{Action, AppState};

/// Handles a single synchronous keyboard event.
pub fn handle_key_event(key: KeyEvent, state: &mut AppState, query: &QueryViewModel) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => {
            state.should_quit = true;
            return Action::Quit;
        }
        KeyCode::Esc => {
            state.should_quit = true;
            return Action::Quit;
        }
        KeyCode::Tab => {
            let from = state.view;
            state.view = from.next();
            return Action::SwitchView { from, to: state.view };
        }
        _ => {}
    }

    match state.view {
        View::Dashboard => dashboard_key(key, state),
        View::Query => query_key(key, ctrl, state, query),
    }
}

fn dashboard_key(key: KeyEvent, state: &mut AppState) -> Action {
    match key.code {
        KeyCode::Char('r') => return Action::Reload,
        KeyCode::Left => state.previous_collection(),
        KeyCode::Right => state.next_collection(),
        _ => {}
    }
    Action::None
}

fn query_key(key: KeyEvent, ctrl: bool, state: &mut AppState, query: &QueryViewModel) -> Action {
    match key.code {
        KeyCode::Char('l') if ctrl => query.clear_messages(),
        KeyCode::Enter => {
            // One question in flight at a time.
            if !query.snapshot().loading {
                return Action::Ask;
            }
        }
        KeyCode::Up | KeyCode::Down => {
            let suggestions = query.suggested_questions();
            let delta = if key.code == KeyCode::Up { -1 } else { 1 };
            if let Some(i) = state.step_suggestion(delta, suggestions.len()) {
                query.select_question(suggestions[i]);
            }
        }
        KeyCode::Backspace => query.edit_question(|q| {
            q.pop();
        }),
        KeyCode::Char(c) if !ctrl => {
            state.suggestion = None;
            query.edit_question(|q| q.push(c));
        }
        _ => {}
    }
    Action::None
}
