//! Line classification for the two upstream framing conventions.
//!
//! Both upstreams deliver one JSON object per line; the SSE-style upstream
//! additionally prefixes payload lines with `data: ` and terminates with a
//! `[DONE]` sentinel. A line that fails to parse is dropped and the stream
//! continues — keep-alive lines and comments are expected, and the upstream
//! contract is one complete frame per line (no re-assembly across lines).

/// One fully-formed line, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Blank line, comment, keep-alive, or an unparseable payload. Skipped.
    Ignorable,
    /// The `[DONE]` sentinel: normal termination, distinct from end-of-stream.
    Sentinel,
    /// A parsed JSON payload of as-yet-unknown shape.
    Candidate(serde_json::Value),
}

/// Sentinel literal signalling normal stream termination.
const DONE_SENTINEL: &str = "[DONE]";

/// Classify one complete line.
pub fn parse_frame(line: &str) -> Frame {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed == ":" {
        return Frame::Ignorable;
    }

    let payload = trimmed
        .strip_prefix("data:")
        .map(str::trim_start)
        .unwrap_or(trimmed);

    if payload == DONE_SENTINEL {
        return Frame::Sentinel;
    }

    match serde_json::from_str(payload) {
        Ok(value) => Frame::Candidate(value),
        Err(err) => {
            tracing::trace!(error = %err, "dropping unparseable frame");
            Frame::Ignorable
        }
    }
}
