pub mod error;
pub mod types;

pub use error::{ExaError, Result};
pub use types::{ContentResult, ContentsRequest, ContentsResponse, Subpage, SummaryOptions};

const BASE_URL: &str = "https://api.exa.ai";

pub struct ExaClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ExaClient {
    /// Standalone client with its own connection pool.
    pub fn new(api_key: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_key)
    }

    /// Share a connection pool across short-lived clients (one per key draw).
    pub fn with_client(client: reqwest::Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Fetch page contents (and summaries / sub-pages, as requested).
    pub async fn contents(&self, request: &ContentsRequest) -> Result<ContentsResponse> {
        let url = format!("{}/contents", self.base_url);
        tracing::debug!(urls = ?request.urls, subpages = ?request.subpages, "Exa contents request");

        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ExaError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let contents: ContentsResponse = serde_json::from_str(&body)?;
        tracing::debug!(
            request_id = ?contents.request_id,
            results = contents.results.len(),
            "Exa contents response"
        );
        Ok(contents)
    }
}
