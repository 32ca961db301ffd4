//! Terminal user interface for `ontodash ui`.
//!
//! Exposes the ratatui state, key handling and drawing, plus the event loop
//! that wires them to the dashboard and query view-models.

pub mod app;
pub mod input;
pub mod render;
pub mod runner;

pub use app::{Action, AppState};
pub use input::handle_key_event;
pub use render::{draw_ui, Screen};
pub use runner::run;
