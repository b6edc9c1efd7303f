//! Classification stage: crawl the subject's site (or LinkedIn page) through
//! Exa and read back a schema-constrained summary.

use ai_client::{strip_code_blocks, StructuredOutput};
use async_trait::async_trait;
use exa_client::{ContentsRequest, ExaClient, ExaError};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use investor_common::{
    Classification, ClassificationSummary, CrawledPage, EntityType, InvestorError, InvestorType,
    Result,
};

use crate::key_pool::KeyPool;
use crate::traits::Classifier;

const SERVICE: &str = "Exa";

/// Sub-pages crawled per identifier.
pub const SUBPAGE_COUNT: u32 = 5;

/// Topic hints steering which sub-pages get crawled.
pub const SUBPAGE_TARGETS: [&str; 7] = [
    "about",
    "portfolio",
    "team",
    "contact",
    "thesis",
    "investments",
    "apply link",
];

const SUMMARY_QUERY: &str = "Classify the subject of this website or profile. \
Is it a person or an organization? Is it an investor (venture capital firm, angel, \
fund, family office, accelerator, or similar)? If so, which investor types apply? \
Give the clean display name of the person or organization.";

/// Output contract sent with the summary request.
#[derive(Deserialize, JsonSchema)]
#[allow(dead_code)]
struct SummaryContract {
    entity_type: EntityType,
    is_investor: bool,
    investor_types: Vec<InvestorType>,
    clean_name: String,
}

/// Strict JSON schema for the classification summary.
pub fn summary_schema() -> Value {
    SummaryContract::strict_schema()
}

/// Read the service's `summary` field, which may be a JSON string or an
/// already-decoded object. Returns `None` when it is not a JSON object.
pub fn parse_summary(raw: Option<&Value>) -> Option<ClassificationSummary> {
    let value = match raw? {
        Value::String(text) => serde_json::from_str::<Value>(strip_code_blocks(text)).ok()?,
        other => other.clone(),
    };
    let obj = value.as_object()?;

    let entity_type = obj
        .get("entity_type")
        .and_then(Value::as_str)
        .map(EntityType::from_label)
        .unwrap_or(EntityType::Organization);

    let investor_types: Vec<String> = obj
        .get("investor_types")
        .and_then(Value::as_array)
        .map(|types| {
            types
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let flagged = obj
        .get("is_investor")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let clean_name = obj
        .get("clean_name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    Some(ClassificationSummary {
        entity_type,
        is_investor: flagged && !investor_types.is_empty(),
        investor_types,
        clean_name,
    })
}

fn exa_error(err: ExaError) -> InvestorError {
    match err {
        ExaError::Api { status, message } => InvestorError::external(SERVICE, Some(status), message),
        other => InvestorError::external(SERVICE, None, other.to_string()),
    }
}

/// Classifier backed by Exa `/contents`, drawing a key from the pool per call.
pub struct ExaClassifier {
    keys: KeyPool,
    http: reqwest::Client,
    base_url: Option<String>,
}

impl ExaClassifier {
    pub fn new(keys: KeyPool, http: reqwest::Client) -> Self {
        Self {
            keys,
            http,
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    fn client(&self) -> ExaClient {
        let client = ExaClient::with_client(self.http.clone(), self.keys.next_key().to_string());
        match &self.base_url {
            Some(url) => client.with_base_url(url.as_str()),
            None => client,
        }
    }
}

#[async_trait]
impl Classifier for ExaClassifier {
    async fn classify(&self, url: &str) -> Result<Classification> {
        let request = ContentsRequest::new(url)
            .with_summary(SUMMARY_QUERY, summary_schema())
            .with_subpages(SUBPAGE_COUNT, &SUBPAGE_TARGETS);

        let response = self.client().contents(&request).await.map_err(exa_error)?;

        let result = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| InvestorError::NotFound(format!("No content found for {url}")))?;

        let summary = parse_summary(result.summary.as_ref());
        if summary.is_none() {
            warn!(url, "Classification summary missing or unparseable; treating as non-investor");
        }

        let subpages: Vec<CrawledPage> = result
            .subpages
            .into_iter()
            .map(|page| CrawledPage {
                url: page.url,
                title: page.title,
            })
            .collect();

        info!(
            url,
            is_investor = summary.as_ref().is_some_and(|s| s.is_investor),
            subpages = subpages.len(),
            "Classification complete"
        );

        Ok(Classification { summary, subpages })
    }
}
