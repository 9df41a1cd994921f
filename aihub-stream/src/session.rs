//! The streaming session: orchestrates the read→assemble→parse→normalize loop.
//!
//! A session owns its line assembler and lifecycle state exclusively, so no
//! locks are involved; independent sessions share nothing and may run
//! concurrently. The synchronous core ([`SessionState`]) is driven by the
//! async [`StreamSession::run`] loop, which suspends cooperatively while
//! awaiting the next chunk and races the read against a cancellation token.

use std::pin::pin;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use aihub_types::{ChatRecord, SessionStatus, TransportError};

use crate::frame::{Frame, parse_frame};
use crate::lines::LineAssembler;
use crate::schema::extract_delta;

/// The terminal result of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    /// The terminal status (`Completed`, `Failed`, or `Cancelled`).
    pub status: SessionStatus,
    /// The full text accumulated before termination.
    pub text: String,
    /// The transport error message, present only when `status` is `Failed`.
    pub error: Option<String>,
}

impl SessionOutcome {
    /// Build the history record for this outcome.
    #[must_use]
    pub fn into_record(self, input: impl Into<String>, model: impl Into<String>) -> ChatRecord {
        ChatRecord::from_session(input, model, self.status, self.text, self.error)
    }
}

/// Synchronous decoding core of a streaming session.
///
/// Feed-oriented: chunks go in, full-text snapshots come out. The cumulative
/// text is extended by concatenation only while `Streaming`, and once the
/// status leaves `Streaming` it never changes again — chunks fed after a
/// terminal state are ignored.
#[derive(Debug, Default)]
pub struct SessionState {
    status: SessionStatus,
    text: String,
    error: Option<String>,
    lines: LineAssembler,
}

impl SessionState {
    /// Create an idle session state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// The text accumulated so far.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the session has reached a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Transition `Idle → Streaming`. A no-op once started.
    pub fn start(&mut self) {
        if self.status == SessionStatus::Idle {
            self.status = SessionStatus::Streaming;
        }
    }

    /// Feed one chunk of the response body.
    ///
    /// Returns one snapshot of the **full** cumulative text per accepted
    /// delta, in arrival order, so a consumer can always replace-in-place
    /// rather than accumulate independently. A sentinel frame completes the
    /// session immediately; anything after it is ignored.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<String> {
        if self.status != SessionStatus::Streaming {
            return Vec::new();
        }

        let mut updates = Vec::new();
        for line in self.lines.feed(chunk) {
            self.apply_line(&line, &mut updates);
            if self.is_terminal() {
                break;
            }
        }
        updates
    }

    /// Signal end-of-stream: flush the assembler's remainder and transition
    /// `Streaming → Completed`.
    pub fn finish_stream(&mut self) -> Vec<String> {
        if self.status != SessionStatus::Streaming {
            return Vec::new();
        }

        let mut updates = Vec::new();
        if let Some(line) = self.lines.finish() {
            self.apply_line(&line, &mut updates);
        }
        if self.status == SessionStatus::Streaming {
            self.status = SessionStatus::Completed;
        }
        updates
    }

    /// Transition `Streaming → Failed` with the transport's message.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.status == SessionStatus::Streaming {
            self.status = SessionStatus::Failed;
            self.error = Some(message.into());
        }
    }

    /// Transition `Streaming → Cancelled`, keeping the accumulated text.
    pub fn cancel(&mut self) {
        if self.status == SessionStatus::Streaming {
            self.status = SessionStatus::Cancelled;
        }
    }

    /// Consume the state into its terminal outcome.
    #[must_use]
    pub fn into_outcome(self) -> SessionOutcome {
        SessionOutcome {
            status: self.status,
            text: self.text,
            error: self.error,
        }
    }

    fn apply_line(&mut self, line: &str, updates: &mut Vec<String>) {
        match parse_frame(line) {
            Frame::Ignorable => {}
            Frame::Sentinel => self.status = SessionStatus::Completed,
            Frame::Candidate(value) => {
                // Empty deltas (e.g. the NDJSON done frame's "" content)
                // contribute nothing and emit no update.
                if let Some(delta) = extract_delta(&value) {
                    if !delta.is_empty() {
                        self.text.push_str(delta);
                        updates.push(self.text.clone());
                    }
                }
            }
        }
    }
}

/// An async streaming session over one byte source.
///
/// Exactly one session drives one byte source; reads are strictly sequential.
/// Cancellation is cooperative: cancelling the token wins the race against
/// the in-flight read, and dropping the byte source closes the transport.
pub struct StreamSession {
    state: SessionState,
    cancel: CancellationToken,
}

impl Default for StreamSession {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamSession {
    /// Create a session with its own cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self::with_token(CancellationToken::new())
    }

    /// Create a session cancelled through an externally owned token.
    #[must_use]
    pub fn with_token(cancel: CancellationToken) -> Self {
        Self {
            state: SessionState::new(),
            cancel,
        }
    }

    /// A handle that cancels this session when triggered.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Drive the session over `chunks` to a terminal state.
    ///
    /// `on_update` receives the full cumulative text after each accepted
    /// delta; the session holds no reference to the consumer's state. The
    /// returned outcome is produced exactly once.
    pub async fn run<S, F>(mut self, chunks: S, mut on_update: F) -> SessionOutcome
    where
        S: Stream<Item = Result<Bytes, TransportError>>,
        F: FnMut(&str),
    {
        self.state.start();
        let mut chunks = pin!(chunks);

        while !self.state.is_terminal() {
            tokio::select! {
                () = self.cancel.cancelled() => {
                    self.state.cancel();
                }
                next = chunks.next() => match next {
                    Some(Ok(chunk)) => {
                        for snapshot in self.state.push_chunk(&chunk) {
                            on_update(&snapshot);
                        }
                    }
                    Some(Err(err)) => {
                        self.state.fail(err.to_string());
                    }
                    None => {
                        for snapshot in self.state.finish_stream() {
                            on_update(&snapshot);
                        }
                    }
                },
            }
        }

        tracing::debug!(
            status = ?self.state.status(),
            bytes = self.state.text().len(),
            "stream session terminated"
        );
        self.state.into_outcome()
    }
}
