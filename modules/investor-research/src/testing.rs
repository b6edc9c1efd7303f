// In-memory doubles for the pipeline's trait seams.
//
// - MockClassifier (Classifier): URL → Classification, or a scripted failure
// - MockResearcher (DeepResearcher): fixed answer, empty answer, or failure
// - MockExtractor (StructuredExtractor): fixed JSON value
// - MemoryStore (InvestorStore): Vec-backed rows, optional write failure
//
// Every mock counts its calls so tests can assert which stages ran.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use investor_common::{
    BaseRecord, Classification, ClassificationSummary, CrawledPage, EnrichmentUpdate, EntityType,
    InvestorError, Result,
};

use crate::store::InvestorRecord;
use crate::traits::{Classifier, DeepResearcher, InvestorStore, StructuredExtractor};

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn summary(entity_type: EntityType, investor_types: &[&str], name: &str) -> ClassificationSummary {
    ClassificationSummary {
        entity_type,
        is_investor: !investor_types.is_empty(),
        investor_types: investor_types.iter().map(|t| t.to_string()).collect(),
        clean_name: Some(name.to_string()),
    }
}

pub fn page(url: &str, title: &str) -> CrawledPage {
    CrawledPage {
        url: Some(url.to_string()),
        title: Some(title.to_string()),
    }
}

// ---------------------------------------------------------------------------
// MockClassifier
// ---------------------------------------------------------------------------

pub struct MockClassifier {
    responses: HashMap<String, Classification>,
    failure: Option<(Option<u16>, String)>,
    calls: Mutex<Vec<String>>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on(mut self, url: &str, summary: Option<ClassificationSummary>, subpages: Vec<CrawledPage>) -> Self {
        self.responses
            .insert(url.to_string(), Classification { summary, subpages });
        self
    }

    /// Every call fails as an upstream error with this status.
    pub fn failing(mut self, status: Option<u16>, body: &str) -> Self {
        self.failure = Some((status, body.to_string()));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, url: &str) -> Result<Classification> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }
        if let Some((status, body)) = &self.failure {
            return Err(InvestorError::external("Exa", *status, body.clone()));
        }
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| InvestorError::NotFound(format!("No content found for {url}")))
    }
}

// ---------------------------------------------------------------------------
// MockResearcher
// ---------------------------------------------------------------------------

pub struct MockResearcher {
    answer: Option<String>,
    failure: Option<(Option<u16>, String)>,
    prompts: Mutex<Vec<String>>,
}

impl MockResearcher {
    pub fn answering(text: &str) -> Self {
        Self {
            answer: Some(text.to_string()),
            failure: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Service answers but with no usable text.
    pub fn empty() -> Self {
        Self {
            answer: None,
            failure: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: Option<u16>, body: &str) -> Self {
        Self {
            answer: None,
            failure: Some((status, body.to_string())),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl DeepResearcher for MockResearcher {
    async fn research(&self, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        if let Some((status, body)) = &self.failure {
            return Err(InvestorError::external("Deep research", *status, body.clone()));
        }
        self.answer
            .clone()
            .ok_or(InvestorError::EmptyResponse("Deep research"))
    }
}

// ---------------------------------------------------------------------------
// MockExtractor
// ---------------------------------------------------------------------------

pub struct MockExtractor {
    response: Value,
    messages: Mutex<Vec<(String, String)>>,
}

impl MockExtractor {
    pub fn returning(response: Value) -> Self {
        Self {
            response,
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// `(system, user)` pairs received, in order.
    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl StructuredExtractor for MockExtractor {
    async fn extract(&self, system: &str, user: &str) -> Result<Value> {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((system.to_string(), user.to_string()));
        }
        Ok(self.response.clone())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<InvestorRecord>>,
    fail_writes: bool,
    lookups: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every insert/update fails with a persistence error.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Seed a row directly, bypassing the write counter.
    pub fn seed(&self, base: &BaseRecord) -> Uuid {
        let id = Uuid::new_v4();
        if let Ok(mut rows) = self.rows.lock() {
            rows.push(InvestorRecord::new_base(id, base, Utc::now()));
        }
        id
    }

    pub fn records(&self) -> Vec<InvestorRecord> {
        self.rows.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn find(&self, matches: impl Fn(&InvestorRecord) -> bool) -> Result<Option<Uuid>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let rows = self.lock()?;
        Ok(rows.iter().find(|r| matches(r)).map(|r| r.id))
    }

    fn begin_write(&self) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(InvestorError::Persistence("MemoryStore: writes disabled".to_string()));
        }
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<InvestorRecord>>> {
        self.rows
            .lock()
            .map_err(|_| InvestorError::Persistence("MemoryStore: poisoned lock".to_string()))
    }
}

#[async_trait]
impl InvestorStore for MemoryStore {
    async fn find_by_domain(&self, domain: &str) -> Result<Option<Uuid>> {
        self.find(|r| r.domain.as_deref() == Some(domain))
    }

    async fn find_by_linkedin(&self, path: &str) -> Result<Option<Uuid>> {
        self.find(|r| r.linkedin_url.as_deref() == Some(path))
    }

    async fn insert_base(&self, record: &BaseRecord) -> Result<Uuid> {
        self.begin_write()?;
        let id = Uuid::new_v4();
        self.lock()?
            .push(InvestorRecord::new_base(id, record, Utc::now()));
        Ok(id)
    }

    async fn update_base(&self, id: Uuid, record: &BaseRecord) -> Result<()> {
        self.begin_write()?;
        let mut rows = self.lock()?;
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| InvestorError::Persistence(format!("investor {id} not found")))?;
        row.apply_base(record, Utc::now());
        Ok(())
    }

    async fn apply_enrichment(&self, id: Uuid, update: &EnrichmentUpdate) -> Result<()> {
        self.begin_write()?;
        let mut rows = self.lock()?;
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| InvestorError::Persistence(format!("investor {id} not found")))?;
        row.apply_enrichment(update, Utc::now());
        Ok(())
    }
}
