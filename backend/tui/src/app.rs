//! TUI App State
//!
//! Screen-level state that is not owned by a view-model: which view is
//! showing, which dashboard collection is visible, and the highlighted
//! suggestion.

use ontodash_core::Collection;
use ontodash_routing::View;

/// Side effect requested by a key press, carried out by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Reload,
    Ask,
    /// The visible view changed from `from`.
    SwitchView { from: View, to: View },
}

pub struct AppState {
    pub view: View,
    /// Index into [`Collection::ALL`].
    pub collection: usize,
    pub suggestion: Option<usize>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(view: View) -> Self {
        Self {
            view,
            collection: 1,
            suggestion: None,
            should_quit: false,
        }
    }

    pub fn current_collection(&self) -> Collection {
        Collection::ALL[self.collection % Collection::ALL.len()]
    }

    pub fn next_collection(&mut self) {
        self.collection = (self.collection + 1) % Collection::ALL.len();
    }

    pub fn previous_collection(&mut self) {
        let len = Collection::ALL.len();
        self.collection = (self.collection + len - 1) % len;
    }

    /// Move the suggestion highlight by `delta`, wrapping over `count` entries.
    pub fn step_suggestion(&mut self, delta: isize, count: usize) -> Option<usize> {
        if count == 0 {
            self.suggestion = None;
            return None;
        }
        let next = match self.suggestion {
            None if delta < 0 => count - 1,
            None => 0,
            Some(i) => (i as isize + delta).rem_euclid(count as isize) as usize,
        };
        self.suggestion = Some(next);
        Some(next)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(View::Dashboard)
    }
}
