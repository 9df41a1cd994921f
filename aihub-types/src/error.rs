//! Transport error taxonomy.

use std::time::Duration;

/// Errors from the transport carrying the response body.
///
/// A transport error is fatal to a streaming session: the session transitions
/// to `Failed`, keeping whatever text had accumulated. Per-frame anomalies
/// (unparseable lines, unknown JSON shapes) are absorbed inside the decoder
/// and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The initiating request returned a non-success status before any chunk
    /// was produced.
    #[error("http {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, if any.
        body: String,
    },
    /// Network-level error (connection reset, DNS failure, etc.).
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The request or a body read timed out.
    #[error("timeout after {0:?}")]
    Timeout(Duration),
    /// Reading the response body failed mid-stream.
    #[error("read error: {0}")]
    Read(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_includes_code_and_body() {
        let err = TransportError::Status {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.to_string(), "http 502: bad gateway");
    }

    #[test]
    fn read_display_includes_message() {
        let err = TransportError::Read("connection reset by peer".into());
        assert!(err.to_string().contains("connection reset"));
    }
}
