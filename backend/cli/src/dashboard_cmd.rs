//! CLI Dashboard Command
//!
//! One-shot dashboard: loads every collection once, prints the stats and
//! one table per non-empty collection.

use std::sync::Arc;

use ontodash_core::{Collection, OntologyApi, RefreshBus};
use ontodash_views::{ApiStatus, DashboardViewModel};

use crate::terminal_output::{
    note_info, note_warn, render_collection, supports_color, BOLD, RESET,
};

/// Returns `false` when the backend was unreachable.
pub async fn run(api: Arc<dyn OntologyApi>, bus: RefreshBus) -> bool {
    let vm = DashboardViewModel::new(api, bus);
    vm.activate();
    vm.settled().await;
    let mut changes = vm.changes();
    // The health check is not part of the load join.
    while vm.snapshot().api_status == ApiStatus::Checking {
        if changes.changed().await.is_err() {
            break;
        }
    }
    vm.deactivate();

    let state = vm.snapshot();
    println!("\n📊 Ontology dashboard · API {}\n", state.api_status.label());
    note_info(&format!(
        "{} classes, {} properties, {} individuals",
        state.stats.classes, state.stats.properties, state.stats.individuals
    ));

    for collection in Collection::ALL.into_iter().skip(1) {
        let table = state.table(collection);
        let title = format!("{} ({})", collection.label(), table.rows.len());
        if supports_color() {
            println!("\n{BOLD}{title}{RESET}");
        } else {
            println!("\n{title}");
        }
        if table.rows.is_empty() {
            println!("  (none)");
        } else {
            print!("{}", render_collection(&table));
        }
    }

    for (collection, error) in &state.last_errors {
        note_warn(&format!("{collection}: {error}"));
    }
    state.api_status == ApiStatus::Connected
}
