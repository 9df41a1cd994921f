#![deny(missing_docs)]
//! Shared types for the AI Hub chat stream decoder.
//!
//! Holds the wire-facing request types, the session lifecycle status, the
//! transport error taxonomy, and the terminal history record handed to the
//! history collaborator once per session. The decoder itself lives in
//! `aihub-stream`.

mod error;
mod record;
mod types;

pub use error::TransportError;
pub use record::{ChatOutput, ChatRecord, HistorySink, RecordStatus};
pub use types::{ChatMessage, ChatRequest, Role, SessionStatus};
