mod client;
pub(crate) mod schema;
pub(crate) mod types;

pub use schema::StructuredOutput;

use tracing::warn;

use crate::error::{AiError, Result};
use crate::util::parse_json_content;

use client::OpenAiClient;

// =============================================================================
// OpenAi Agent
// =============================================================================

#[derive(Clone)]
pub struct OpenAi {
    api_key: String,
    model: String,
    base_url: Option<String>,
    http: reqwest::Client,
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn client(&self) -> OpenAiClient {
        let client = OpenAiClient::new(&self.api_key, self.http.clone());
        match self.base_url {
            Some(ref url) => client.with_base_url(url),
            None => client,
        }
    }

    /// JSON-mode completion: the model is asked for a single JSON object and
    /// the first choice is parsed into a [`serde_json::Value`].
    pub async fn json_completion(
        &self,
        system: impl Into<String>,
        user: impl Into<String>,
        max_tokens: u32,
    ) -> Result<serde_json::Value> {
        if self.api_key.is_empty() {
            return Err(AiError::Config("OpenAI API key is empty".to_string()));
        }

        let request = types::ChatRequest::new(&self.model)
            .message(types::WireMessage::system(system))
            .message(types::WireMessage::user(user))
            .token_budget(max_tokens)
            .json_object();

        let response = self.client().chat(&request).await?;

        let choice = response.choices.into_iter().next().ok_or(AiError::Empty)?;
        if choice.finish_reason.as_deref() == Some("length") {
            warn!(model = %self.model, max_tokens, "Completion hit the token ceiling");
        }
        let content = choice.message.content.ok_or(AiError::Empty)?;

        parse_json_content(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        })
    }

    #[tokio::test]
    async fn json_completion_parses_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion(r#"{"hq_country": "US"}"#)),
            )
            .mount(&server)
            .await;

        let ai = OpenAi::new("sk-test", "gpt-4o-mini").with_base_url(server.uri());
        let value = ai.json_completion("system", "user", 4096).await.unwrap();
        assert_eq!(value["hq_country"], "US");
    }

    #[tokio::test]
    async fn in_band_error_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"error": {"message": "context too long"}})),
            )
            .mount(&server)
            .await;

        let ai = OpenAi::new("sk-test", "gpt-4o-mini").with_base_url(server.uri());
        let err = ai.json_completion("system", "user", 4096).await.unwrap_err();
        assert!(matches!(err, AiError::Upstream(ref m) if m == "context too long"));
    }

    #[tokio::test]
    async fn http_failure_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let ai = OpenAi::new("sk-test", "gpt-4o-mini").with_base_url(server.uri());
        let err = ai.json_completion("system", "user", 4096).await.unwrap_err();
        assert!(matches!(err, AiError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn empty_key_is_a_config_error() {
        let ai = OpenAi::new("", "gpt-4o-mini");
        let err = ai.json_completion("system", "user", 4096).await.unwrap_err();
        assert!(matches!(err, AiError::Config(_)));
    }
}
