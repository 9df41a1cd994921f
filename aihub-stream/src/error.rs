//! Internal helpers mapping HTTP/reqwest failures to [`TransportError`].

use std::time::Duration;

use aihub_types::TransportError;

/// Map a non-success HTTP status (seen before any body chunk) to a
/// [`TransportError`].
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> TransportError {
    TransportError::Status {
        status: status.as_u16(),
        body: body.to_string(),
    }
}

/// Map a [`reqwest::Error`] from the request/send path.
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(Duration::from_secs(30))
    } else {
        TransportError::Network(Box::new(err))
    }
}

/// Map a [`reqwest::Error`] from a mid-stream body read.
pub(crate) fn map_read_error(err: reqwest::Error) -> TransportError {
    TransportError::Read(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_preserves_code_and_body() {
        let err = map_http_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(matches!(
            err,
            TransportError::Status { status: 500, body } if body == "boom"
        ));
    }

    #[test]
    fn status_mapping_keeps_empty_body() {
        let err = map_http_status(reqwest::StatusCode::BAD_GATEWAY, "");
        assert!(matches!(
            err,
            TransportError::Status { status: 502, body } if body.is_empty()
        ));
    }
}
