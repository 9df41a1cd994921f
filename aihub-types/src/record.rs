//! The terminal history record and the history collaborator trait.

use serde::{Deserialize, Serialize};

use crate::types::SessionStatus;

/// Outcome status as stored by the history collaborator.
///
/// Cancellation is a normal (non-error) outcome: a cancelled session is
/// recorded as `Completed` with whatever text had accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// The session produced a usable (possibly truncated) response.
    Completed,
    /// The session failed at the transport level.
    Error,
}

/// The response payload of a successful record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatOutput {
    /// The full reconstructed message text.
    pub response: String,
}

/// The record handed to the history collaborator exactly once per session.
///
/// Field names serialize in camelCase to match the upstream data store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRecord {
    /// Always `"chat"` for records produced by the stream decoder.
    pub request_type: String,
    /// The user input that initiated the request.
    pub input: String,
    /// The decoded output, or `None` when the session failed.
    pub output: Option<ChatOutput>,
    /// The model that served the request.
    pub model: String,
    /// Terminal outcome status.
    pub status: RecordStatus,
    /// Transport error message, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ChatRecord {
    /// Build the record for a terminated session.
    ///
    /// `Failed` maps to an error record with no output; `Completed` and
    /// `Cancelled` map to a completed record carrying the accumulated text.
    #[must_use]
    pub fn from_session(
        input: impl Into<String>,
        model: impl Into<String>,
        status: SessionStatus,
        text: String,
        error: Option<String>,
    ) -> Self {
        let failed = status == SessionStatus::Failed;
        Self {
            request_type: "chat".into(),
            input: input.into(),
            output: (!failed).then_some(ChatOutput { response: text }),
            model: model.into(),
            status: if failed {
                RecordStatus::Error
            } else {
                RecordStatus::Completed
            },
            error_message: error,
        }
    }
}

/// External collaborator that persists one [`ChatRecord`] per session.
///
/// The decoder calls [`HistorySink::record`] exactly once, after the session
/// has reached a terminal state.
pub trait HistorySink: Send {
    /// Persist one terminal record.
    fn record(&mut self, record: ChatRecord);
}

impl HistorySink for Vec<ChatRecord> {
    fn record(&mut self, record: ChatRecord) {
        self.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_session_maps_to_completed_record() {
        let record = ChatRecord::from_session(
            "hello",
            "llama3.2",
            SessionStatus::Completed,
            "hi there".into(),
            None,
        );
        assert_eq!(record.status, RecordStatus::Completed);
        assert_eq!(
            record.output,
            Some(ChatOutput {
                response: "hi there".into()
            })
        );
        assert!(record.error_message.is_none());
    }

    #[test]
    fn failed_session_maps_to_error_record_without_output() {
        let record = ChatRecord::from_session(
            "hello",
            "llama3.2",
            SessionStatus::Failed,
            String::new(),
            Some("http 500: boom".into()),
        );
        assert_eq!(record.status, RecordStatus::Error);
        assert!(record.output.is_none());
        assert_eq!(record.error_message.as_deref(), Some("http 500: boom"));
    }

    #[test]
    fn cancelled_session_keeps_partial_text() {
        let record = ChatRecord::from_session(
            "hello",
            "llama3.2",
            SessionStatus::Cancelled,
            "partial".into(),
            None,
        );
        assert_eq!(record.status, RecordStatus::Completed);
        assert_eq!(
            record.output,
            Some(ChatOutput {
                response: "partial".into()
            })
        );
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = ChatRecord::from_session(
            "q",
            "llama3.2",
            SessionStatus::Completed,
            "a".into(),
            None,
        );
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["requestType"], "chat");
        assert_eq!(json["output"]["response"], "a");
        assert_eq!(json["status"], "completed");
        assert!(json.get("errorMessage").is_none());
    }

    #[test]
    fn vec_sink_collects_records() {
        let mut sink: Vec<ChatRecord> = Vec::new();
        sink.record(ChatRecord::from_session(
            "q",
            "m",
            SessionStatus::Completed,
            "a".into(),
            None,
        ));
        assert_eq!(sink.len(), 1);
    }
}
