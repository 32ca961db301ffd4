//! CLI Ask Command
//!
//! Sends one natural-language question or CRUD command through the query
//! view-model and prints what came back.

use std::sync::Arc;
use std::time::Duration;

use ontodash_core::{OntologyApi, RefreshBus};
use ontodash_views::{AskOutcome, QueryViewModel};

use crate::terminal_output::{dim, note_error, note_info, note_success, render_rows};

/// Returns `true` on an answer or a successful mutation.
pub async fn run(
    api: Arc<dyn OntologyApi>,
    bus: RefreshBus,
    refresh_delay: Duration,
    question: &str,
) -> bool {
    let vm = QueryViewModel::new(api, bus).with_refresh_delay(refresh_delay);
    vm.set_question(question);
    let outcome = vm.ask().await;
    let state = vm.snapshot();

    match outcome {
        AskOutcome::Rejected | AskOutcome::Failed => {
            note_error(&state.error);
            false
        }
        AskOutcome::Read { rows } => {
            note_info(&format!("{rows} result(s)"));
            if rows > 0 {
                print!("{}", render_rows(&state.results));
            }
            if !state.sparql.is_empty() {
                println!("\n{}", dim(&state.sparql));
            }
            true
        }
        AskOutcome::Mutation { action } => {
            note_success(&format!("[{action}] {}", state.success_message));
            if !state.results.is_empty() {
                print!("{}", render_rows(&state.results));
            }
            true
        }
    }
}
