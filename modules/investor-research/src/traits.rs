// Trait seams for every collaborator the pipeline talks to.
//
// Classifier, DeepResearcher and StructuredExtractor wrap the three external
// services; InvestorStore wraps the record store. Production adapters live in
// classify.rs, research.rs, extract.rs and store/postgres.rs; in-memory
// doubles live in testing.rs behind the `test-support` feature.

use async_trait::async_trait;
use uuid::Uuid;

use investor_common::{BaseRecord, Classification, EnrichmentUpdate, Result};

// ---------------------------------------------------------------------------
// External services
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Classifier: Send + Sync {
    /// Crawl `url` (and its sub-pages) and classify the subject.
    async fn classify(&self, url: &str) -> Result<Classification>;
}

#[async_trait]
pub trait DeepResearcher: Send + Sync {
    /// Run one long-form research prompt and return the answer text.
    async fn research(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait StructuredExtractor: Send + Sync {
    /// Ask for a JSON object given a system instruction and a user message.
    async fn extract(&self, system: &str, user: &str) -> Result<serde_json::Value>;
}

// ---------------------------------------------------------------------------
// Record store
// ---------------------------------------------------------------------------

#[async_trait]
pub trait InvestorStore: Send + Sync {
    async fn find_by_domain(&self, domain: &str) -> Result<Option<Uuid>>;

    async fn find_by_linkedin(&self, path: &str) -> Result<Option<Uuid>>;

    /// Insert a new base row and return its generated id.
    async fn insert_base(&self, record: &BaseRecord) -> Result<Uuid>;

    /// Overwrite the base fields of an existing row.
    async fn update_base(&self, id: Uuid, record: &BaseRecord) -> Result<()>;

    /// Write the deep-research/extraction fields onto an existing row.
    async fn apply_enrichment(&self, id: Uuid, update: &EnrichmentUpdate) -> Result<()>;
}
