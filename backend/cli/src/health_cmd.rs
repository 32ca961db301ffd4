//! CLI Health Command
//!
//! Checks `/health` and reports whether the backend is reachable.

use ontodash_core::OntologyApi;
use tracing::debug;

use crate::terminal_output::{dim, note_error, note_success};

/// Returns `true` when the backend answered.
pub async fn run(api: &dyn OntologyApi, base_url: &str) -> bool {
    match api.health().await {
        Ok(status) => {
            note_success(&format!("API connected ({base_url})"));
            if let Some(message) = status.message.or(status.status) {
                println!("  {}", dim(&message));
            }
            true
        }
        Err(e) => {
            debug!(error = %e, "Health check failed");
            note_error(&format!("API disconnected ({base_url}): {e}"));
            false
        }
    }
}
