//! Structured logging for ontodash.
//!
//! Console and rolling NDJSON file output, log redaction, and the query
//! event log used by the query view.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{QueryEvent, QueryEventEntry, QueryEventLogger};
pub use logger::{init_logger, LogOptions, LoggerGuard};
pub use redact::redact_sensitive_data;
