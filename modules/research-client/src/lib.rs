pub mod answer;
pub mod error;

pub use answer::extract_answer;
pub use error::{ResearchError, Result};

use serde::Serialize;

#[derive(Debug, Serialize)]
struct ResearchRequest<'a> {
    prompt: &'a str,
}

/// Client for the long-form research endpoint. One prompt in, free text out.
pub struct ResearchClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ResearchClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Submit a research prompt and return the extracted answer text.
    pub async fn research(&self, prompt: &str) -> Result<String> {
        tracing::info!(prompt_chars = prompt.len(), "Starting deep research request");

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&ResearchRequest { prompt });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ResearchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let raw = resp.text().await?;
        let body = serde_json::from_str::<serde_json::Value>(&raw)
            .unwrap_or(serde_json::Value::String(raw));

        let answer = extract_answer(&body).ok_or(ResearchError::EmptyResponse)?;
        tracing::info!(answer_chars = answer.len(), "Deep research complete");
        Ok(answer)
    }
}
