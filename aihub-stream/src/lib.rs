#![deny(missing_docs)]
//! Incremental chat-completion stream decoder for the AI Hub.
//!
//! Consumes a chat-completion response body as a byte stream and reconstructs
//! a progressively-growing text message, normalizing two incompatible
//! upstream wire shapes — NDJSON-style `{"message":{"content":...}}` lines
//! and SSE/OpenAI-style `data: {"choices":[{"delta":{"content":...}}]}` lines
//! — while surviving arbitrary network chunk boundaries, including boundaries
//! that split a single UTF-8 character or a single JSON object across reads.
//!
//! The pipeline is strictly one-way:
//!
//! ```text
//! byte source → LineAssembler → parse_frame → extract_delta → session text
//! ```
//!
//! [`StreamSession`] drives the loop over any byte source and reports the
//! terminal outcome; [`ChatClient`] wires it to an HTTP endpoint and hands
//! the terminal record to the history collaborator.

mod client;
mod error;
mod frame;
mod lines;
mod schema;
mod session;

pub use client::ChatClient;
pub use frame::{Frame, parse_frame};
pub use lines::LineAssembler;
pub use schema::extract_delta;
pub use session::{SessionOutcome, SessionState, StreamSession};
