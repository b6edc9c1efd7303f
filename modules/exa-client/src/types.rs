use serde::{Deserialize, Serialize};

// --- /contents request ---

/// Input for the `/contents` endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentsRequest {
    pub urls: Vec<String>,
    /// Full page text is not needed when only the summary is consumed.
    pub text: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryOptions>,
    /// Number of linked sub-pages to crawl from each URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subpages: Option<u32>,
    /// Keywords steering which sub-pages get crawled.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subpage_target: Vec<String>,
}

impl ContentsRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            text: false,
            summary: None,
            subpages: None,
            subpage_target: Vec::new(),
        }
    }

    pub fn with_summary(mut self, query: impl Into<String>, schema: serde_json::Value) -> Self {
        self.summary = Some(SummaryOptions {
            query: query.into(),
            schema: Some(schema),
        });
        self
    }

    pub fn with_subpages(mut self, count: u32, targets: &[&str]) -> Self {
        self.subpages = Some(count);
        self.subpage_target = targets.iter().map(|t| t.to_string()).collect();
        self
    }
}

/// Summary instructions: a free-text query plus an optional JSON schema the
/// summary must conform to.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryOptions {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<serde_json::Value>,
}

// --- /contents response ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentsResponse {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub results: Vec<ContentResult>,
}

/// One crawled page. `summary` is left undecoded: with a schema it is usually
/// a JSON string, but some responses inline the object.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentResult {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<serde_json::Value>,
    #[serde(default)]
    pub subpages: Vec<Subpage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subpage {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}
