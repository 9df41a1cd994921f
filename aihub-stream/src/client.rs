//! HTTP client: produces the byte source a session consumes.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use aihub_types::{ChatRequest, HistorySink, TransportError};

use crate::error::{map_http_status, map_read_error, map_reqwest_error};
use crate::session::{SessionOutcome, SessionState, StreamSession};

/// Default model used when the request does not specify one.
const DEFAULT_MODEL: &str = "llama3.2";

/// Default chat API base URL.
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Client for a streaming chat endpoint.
///
/// # Example
///
/// ```no_run
/// use aihub_stream::ChatClient;
///
/// let client = ChatClient::new()
///     .model("llama3.2")
///     .base_url("http://localhost:11434");
/// ```
pub struct ChatClient {
    /// Default model identifier used when the request does not specify one.
    pub(crate) model: String,
    /// API base URL (override for testing or remote instances).
    pub(crate) base_url: String,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

impl ChatClient {
    /// Create a new client with sensible defaults.
    ///
    /// Default model: `llama3.2`. Default base URL: `http://localhost:11434`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the default model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL.
    ///
    /// Useful for testing with a local mock server.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Build the chat endpoint URL.
    pub(crate) fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    /// The model a given request will be served with.
    fn effective_model(&self, request: &ChatRequest) -> String {
        if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        }
    }

    /// POST the request with `stream: true` and return the response body as a
    /// byte source.
    ///
    /// A non-success HTTP status before any chunk is produced is an immediate
    /// [`TransportError`].
    pub async fn open_stream(
        &self,
        request: &ChatRequest,
    ) -> Result<impl Stream<Item = Result<Bytes, TransportError>> + Send, TransportError> {
        let body = serde_json::json!({
            "model": self.effective_model(request),
            "messages": request.messages,
            "stream": true,
        });

        let url = self.chat_url();
        tracing::debug!(url = %url, model = %body["model"], "opening chat stream");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.map_err(map_reqwest_error)?;
            return Err(map_http_status(status, &body_text));
        }

        Ok(response.bytes_stream().map(|r| r.map_err(map_read_error)))
    }

    /// Run one full streaming chat session.
    ///
    /// Opens the stream, drives a [`StreamSession`] over it, and hands the
    /// terminal record to `history` exactly once — including when the request
    /// itself fails before any chunk arrives, in which case the outcome is
    /// `Failed` with empty text.
    pub async fn stream_chat<F, H>(
        &self,
        request: &ChatRequest,
        cancel: CancellationToken,
        on_update: F,
        history: &mut H,
    ) -> SessionOutcome
    where
        F: FnMut(&str),
        H: HistorySink + ?Sized,
    {
        let outcome = match self.open_stream(request).await {
            Ok(chunks) => StreamSession::with_token(cancel).run(chunks, on_update).await,
            Err(err) => {
                let mut state = SessionState::new();
                state.start();
                state.fail(err.to_string());
                state.into_outcome()
            }
        };

        history.record(
            outcome
                .clone()
                .into_record(request.input_text(), self.effective_model(request)),
        );
        outcome
    }
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aihub_types::ChatMessage;

    #[test]
    fn default_model_is_set() {
        let client = ChatClient::new();
        assert_eq!(client.model, DEFAULT_MODEL);
    }

    #[test]
    fn default_base_url_is_set() {
        let client = ChatClient::new();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn builder_overrides_model() {
        let client = ChatClient::new().model("mistral");
        assert_eq!(client.model, "mistral");
    }

    #[test]
    fn builder_overrides_base_url() {
        let client = ChatClient::new().base_url("http://remote:11434");
        assert_eq!(client.base_url, "http://remote:11434");
    }

    #[test]
    fn chat_url_includes_path() {
        let client = ChatClient::new().base_url("http://localhost:9999");
        assert_eq!(client.chat_url(), "http://localhost:9999/api/chat");
    }

    #[test]
    fn empty_request_model_falls_back_to_client_default() {
        let client = ChatClient::new().model("mistral");
        let request = ChatRequest {
            model: String::new(),
            messages: vec![ChatMessage::user("hi")],
        };
        assert_eq!(client.effective_model(&request), "mistral");
    }

    #[test]
    fn request_model_takes_precedence() {
        let client = ChatClient::new().model("mistral");
        let request = ChatRequest {
            model: "qwen2.5".into(),
            messages: vec![ChatMessage::user("hi")],
        };
        assert_eq!(client.effective_model(&request), "qwen2.5");
    }
}
