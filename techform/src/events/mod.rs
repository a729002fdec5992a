//! Form lifecycle events.
//!
//! The form reports submissions and row edits to an [`EventSink`]. Payloads
//! carry the form session id and never the field values themselves.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink, RecordedEvent};
#[cfg(test)]
pub use sink::MockEventSink;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::list::RowKey;
use crate::schema::ValidationErrors;

/// Event types emitted by the form.
pub mod types {
    /// Validation passed and the completion callback ran.
    pub const SUBMITTED: &str = "form.submitted";
    /// Validation failed.
    pub const REJECTED: &str = "form.rejected";
    /// A technology row was appended.
    pub const ROW_ADDED: &str = "form.row_added";
    /// A technology row was removed.
    pub const ROW_REMOVED: &str = "form.row_removed";
}

/// Builds the payload of a successful submission.
#[must_use]
pub fn submitted_payload(
    session_id: Uuid,
    submitted_at: DateTime<Utc>,
    submit_count: u32,
    tech_count: usize,
) -> serde_json::Value {
    serde_json::json!({
        "session_id": session_id.to_string(),
        "submitted_at": submitted_at.to_rfc3339(),
        "submit_count": submit_count,
        "tech_count": tech_count,
    })
}

/// Builds the payload of a rejected submission.
#[must_use]
pub fn rejected_payload(
    session_id: Uuid,
    submit_count: u32,
    errors: &ValidationErrors,
) -> serde_json::Value {
    let mut codes = serde_json::Map::new();
    for (path, error) in errors {
        codes.insert(path.to_string(), serde_json::json!(error.code()));
    }
    serde_json::json!({
        "session_id": session_id.to_string(),
        "submit_count": submit_count,
        "error_count": errors.len(),
        "errors": codes,
    })
}

/// Builds the payload of a row addition or removal.
#[must_use]
pub fn row_payload(session_id: Uuid, key: RowKey, index: usize, len: usize) -> serde_json::Value {
    serde_json::json!({
        "session_id": session_id.to_string(),
        "row_key": key.as_u64(),
        "index": index,
        "len": len,
    })
}
