use ai_client::{AiError, OpenAi};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use investor_common::{InvestorError, Result};

use crate::traits::StructuredExtractor;

const SERVICE: &str = "OpenAI";

/// [`StructuredExtractor`] using JSON-mode chat completions.
pub struct OpenAiExtractor {
    ai: OpenAi,
    max_tokens: u32,
}

impl OpenAiExtractor {
    pub fn new(ai: OpenAi, max_tokens: u32) -> Self {
        Self { ai, max_tokens }
    }
}

fn ai_error(err: AiError) -> InvestorError {
    match err {
        AiError::Config(message) => InvestorError::Config(message),
        AiError::Api { status, message } => InvestorError::external(SERVICE, Some(status), message),
        AiError::Network(message) => InvestorError::external(SERVICE, None, message),
        AiError::Upstream(message) => InvestorError::Extraction(message),
        AiError::Parse(message) => {
            InvestorError::Extraction(format!("completion was not a JSON object: {message}"))
        }
        AiError::Empty => InvestorError::Extraction("completion had no content".to_string()),
    }
}

#[async_trait]
impl StructuredExtractor for OpenAiExtractor {
    async fn extract(&self, system: &str, user: &str) -> Result<Value> {
        debug!(
            model = self.ai.model(),
            max_tokens = self.max_tokens,
            user_chars = user.len(),
            "Requesting structured extraction"
        );
        self.ai
            .json_completion(system, user, self.max_tokens)
            .await
            .map_err(ai_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn extractor(server: &MockServer) -> OpenAiExtractor {
        OpenAiExtractor::new(
            OpenAi::new("sk-test", "gpt-4o-mini").with_base_url(server.uri()),
            2048,
        )
    }

    #[tokio::test]
    async fn requests_json_mode_with_token_ceiling() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "max_tokens": 2048,
                "response_format": {"type": "json_object"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "message": {"role": "assistant", "content": "{\"hq_country\": \"US\"}"},
                    "finish_reason": "stop"
                }]
            })))
            .mount(&server)
            .await;

        let value = extractor(&server).extract("sys", "user").await.unwrap();
        assert_eq!(value, json!({"hq_country": "US"}));
    }

    #[tokio::test]
    async fn in_band_error_becomes_extraction_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"error": {"message": "rate limited"}})),
            )
            .mount(&server)
            .await;

        let err = extractor(&server).extract("sys", "user").await.unwrap_err();
        assert!(matches!(err, InvestorError::Extraction(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn http_5xx_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = extractor(&server).extract("sys", "user").await.unwrap_err();
        assert_eq!(err.status_code(), 502);
    }
}
