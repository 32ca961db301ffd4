//! CLI SPARQL Command

use ontodash_core::OntologyApi;

use crate::terminal_output::{note_error, note_info, render_rows};

pub async fn run(api: &dyn OntologyApi, sparql: &str) -> bool {
    if sparql.trim().is_empty() {
        note_error("Empty SPARQL query");
        return false;
    }
    match api.execute_query(sparql).await {
        Ok(result) => {
            note_info(&format!("{} result(s)", result.results.len()));
            if !result.results.is_empty() {
                print!("{}", render_rows(&result.results));
            }
            true
        }
        Err(e) => {
            note_error(&e.user_message());
            false
        }
    }
}
