//! View-models behind the dashboard and query screens.
//!
//! Both take the gateway and the refresh bus from their owner; the query
//! view publishes on the bus after a mutation and the dashboard reloads.

pub mod dashboard;
pub mod query;

#[cfg(test)]
mod testing;

pub use dashboard::{ApiStatus, CollectionTable, DashboardState, DashboardViewModel, Phase};
pub use query::{AskOutcome, QueryState, QueryViewModel, DEFAULT_REFRESH_DELAY, EMPTY_QUESTION_MESSAGE};
