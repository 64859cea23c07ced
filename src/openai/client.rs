use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::types::{ApiError, ChatRequest, ChatResponse, Message};
use crate::config::{ApiKey, Config};

#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("API rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("API quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Abstraction over a chat-completions model with function calling.
/// Implemented by `OpenAiClient` for production; mock implementations used in tests.
pub trait ChatModel {
    /// Sends one completion request and returns the assistant message of the first choice.
    async fn complete(&self, request: &ChatRequest) -> Result<Message, OpenAiError>;
}

#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey::new("test-key"),
            base_url: base_url.to_string(),
        }
    }
}

impl ChatModel for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<Message, OpenAiError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            if let Ok(body) = serde_json::from_str::<ChatResponse>(&text)
                && let Some(err) = &body.error
            {
                let classified = classify_api_error(status, err);
                warn!(error = %classified, "OpenAI API error");
                return Err(classified);
            }
            if status == StatusCode::TOO_MANY_REQUESTS {
                warn!("OpenAI API rate limited");
                return Err(OpenAiError::RateLimited);
            }
            let end = text.floor_char_boundary(200);
            warn!(status = %status, "OpenAI API error (no structured body)");
            return Err(OpenAiError::Api {
                code: status.as_u16(),
                message: format!("HTTP {status}: {}", &text[..end]),
            });
        }

        let body: ChatResponse = serde_json::from_str(&text)?;

        if let Some(err) = &body.error {
            let classified = classify_api_error(status, err);
            warn!(error = %classified, "OpenAI API error in 200 response");
            return Err(classified);
        }

        let choice = body.choices.into_iter().next().ok_or_else(|| OpenAiError::Api {
            code: status.as_u16(),
            message: "No choices in response".to_string(),
        })?;

        debug!(
            model = %request.model,
            finish_reason = choice.finish_reason.as_deref().unwrap_or("unknown"),
            tool_calls = choice.message.requested_calls().len(),
            "chat completion received"
        );
        Ok(choice.message)
    }
}

fn classify_api_error(status: StatusCode, err: &ApiError) -> OpenAiError {
    let message = err
        .message
        .clone()
        .unwrap_or_else(|| "Unknown error".to_string());

    let quota = Some("insufficient_quota");
    if err.code.as_deref() == quota || err.kind.as_deref() == quota {
        return OpenAiError::QuotaExhausted(message);
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS => OpenAiError::RateLimited,
        _ => OpenAiError::Api {
            code: status.as_u16(),
            message,
        },
    }
}


#[cfg(test)]
mod http_tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> ChatRequest {
        ChatRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![Message::system("be brief"), Message::user("NBA scores")],
            tools: vec![],
        }
    }

    #[tokio::test]
    async fn complete_success_returns_first_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({"model": "gpt-4o-mini"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {"role": "assistant", "content": "Celtics won."},
                    "finish_reason": "stop"
                }]
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::with_base_url(Client::new(), &server.uri());
        let message = client.complete(&request()).await.unwrap();

        assert_eq!(message.content.as_deref(), Some("Celtics won."));
        assert!(message.requested_calls().is_empty());
    }

    #[tokio::test]
    async fn complete_429_returns_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = OpenAiClient::with_base_url(Client::new(), &server.uri());
        let result = client.complete(&request()).await;
        assert!(matches!(result, Err(OpenAiError::RateLimited)));
    }

    #[tokio::test]
    async fn complete_500_with_error_body_classified() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": {"message": "The server had an error", "type": "server_error", "code": null}
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::with_base_url(Client::new(), &server.uri());
        match client.complete(&request()).await {
            Err(OpenAiError::Api { code: 500, message }) => {
                assert!(message.contains("server had an error"));
            }
            other => panic!("expected Api(500) with body message, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn complete_500_with_invalid_body_returns_generic_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = OpenAiClient::with_base_url(Client::new(), &server.uri());
        match client.complete(&request()).await {
            Err(OpenAiError::Api { code: 502, message }) => {
                assert!(message.contains("bad gateway"), "got: {message}");
            }
            other => panic!("expected Api(502), got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn complete_without_choices_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": []
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::with_base_url(Client::new(), &server.uri());
        let result = client.complete(&request()).await;
        assert!(matches!(result, Err(OpenAiError::Api { code: 200, .. })));
    }
}
