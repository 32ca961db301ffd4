//! Query Event Logger
//!
//! Structured events (question, answer, mutation, failure) emitted on the
//! `query_events` target so they land in the NDJSON log.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum QueryEvent {
    Question {
        question: String,
    },
    Answer {
        rows: usize,
        sparql: Option<String>,
    },
    Mutation {
        action: String,
        message: String,
    },
    Failure {
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct QueryEventEntry {
    pub timestamp: DateTime<Utc>,
    pub event: QueryEvent,
}

pub struct QueryEventLogger;

impl QueryEventLogger {
    /// Redact free-text fields and emit the event through `tracing`.
    pub fn log_event(mut event: QueryEvent) -> QueryEventEntry {
        match &mut event {
            QueryEvent::Question { question } => {
                *question = redact_sensitive_data(question);
            }
            QueryEvent::Mutation { message, .. } => {
                *message = redact_sensitive_data(message);
            }
            QueryEvent::Failure { error_msg } => {
                *error_msg = redact_sensitive_data(error_msg);
            }
            QueryEvent::Answer { .. } => {}
        }

        let entry = QueryEventEntry {
            timestamp: Utc::now(),
            event,
        };

        let json = serde_json::to_string(&entry.event).unwrap_or_default();
        info!(target: "query_events", event = %json, "Query event");
        entry
    }
}
