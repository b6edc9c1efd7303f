//! Pipeline orchestration.
//!
//! One run walks Normalized → DedupChecked → Classified → BaseWritten, then
//! stops for non-investors or continues through DeepResearched →
//! SchemaBuilt → Extracted → FinallyWritten. Any failure aborts the run with
//! that stage's error. Writes already made stay in place; a re-run starts
//! again from the dedup check.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use investor_common::{
    BaseRecord, CanonicalIdentifier, ClassificationSummary, InvestorError, Result, SkipReason,
};

use crate::coerce::{enrichment_from_extraction, in_band_error};
use crate::dedup;
use crate::links::format_links;
use crate::normalize::normalize_identifier;
use crate::prompts::{deep_research_prompt, extraction_user_message, EXTRACTION_SYSTEM_PROMPT};
use crate::schema::ExtractionSchema;
use crate::store::upsert_base;
use crate::traits::{Classifier, DeepResearcher, InvestorStore, StructuredExtractor};

pub const INPUT_REQUIRED: &str = "Input (domain or LinkedIn URL) is required";

/// Terminal state of one run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// A row already exists and skip-on-duplicate was requested.
    Skipped {
        identifier: CanonicalIdentifier,
        reason: SkipReason,
    },
    /// Base row written with `research_status = to_do`.
    NonInvestor {
        identifier: CanonicalIdentifier,
        id: Uuid,
        summary: Option<ClassificationSummary>,
        links: Vec<String>,
    },
    /// Base row written, researched, extracted and updated.
    Enriched {
        identifier: CanonicalIdentifier,
        id: Uuid,
        summary: ClassificationSummary,
        links: Vec<String>,
    },
}

impl PipelineOutcome {
    pub fn identifier(&self) -> &CanonicalIdentifier {
        match self {
            PipelineOutcome::Skipped { identifier, .. }
            | PipelineOutcome::NonInvestor { identifier, .. }
            | PipelineOutcome::Enriched { identifier, .. } => identifier,
        }
    }

    pub fn record_id(&self) -> Option<Uuid> {
        match self {
            PipelineOutcome::Skipped { .. } => None,
            PipelineOutcome::NonInvestor { id, .. } | PipelineOutcome::Enriched { id, .. } => {
                Some(*id)
            }
        }
    }
}

pub struct InvestorPipeline {
    classifier: Arc<dyn Classifier>,
    researcher: Arc<dyn DeepResearcher>,
    extractor: Arc<dyn StructuredExtractor>,
    store: Arc<dyn InvestorStore>,
    skip_existing_default: bool,
}

impl InvestorPipeline {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        researcher: Arc<dyn DeepResearcher>,
        extractor: Arc<dyn StructuredExtractor>,
        store: Arc<dyn InvestorStore>,
        skip_existing_default: bool,
    ) -> Self {
        Self {
            classifier,
            researcher,
            extractor,
            store,
            skip_existing_default,
        }
    }

    /// Run the full pipeline for one raw identifier. `skip_existing` falls
    /// back to the process-wide default when not given.
    pub async fn run(&self, input: &str, skip_existing: Option<bool>) -> Result<PipelineOutcome> {
        let identifier = normalize_identifier(input);
        if identifier.is_empty() {
            return Err(InvestorError::Input(INPUT_REQUIRED.to_string()));
        }
        info!(stage = "normalized", kind = ?identifier.kind, key = %identifier.value, "Identifier normalized");

        let skip_existing = skip_existing.unwrap_or(self.skip_existing_default);
        if let Some(reason) = dedup::check(self.store.as_ref(), &identifier, skip_existing).await? {
            info!(stage = "skipped", key = %identifier.value, reason = reason.as_str(), "Existing record found");
            return Ok(PipelineOutcome::Skipped { identifier, reason });
        }
        info!(stage = "dedup_checked", key = %identifier.value, skip_existing, "No duplicate blocking the run");

        let classification = self.classifier.classify(&identifier.url()).await?;
        let links = format_links(&classification.subpages);
        let summary = classification.summary;
        info!(
            stage = "classified",
            key = %identifier.value,
            is_investor = summary.as_ref().is_some_and(|s| s.is_investor),
            links = links.len(),
            "Classification received"
        );

        let base = BaseRecord::project(&identifier, summary.as_ref(), links.clone());
        let id = upsert_base(self.store.as_ref(), &identifier, &base).await?;
        info!(stage = "base_written", %id, "Base row written");

        let summary = match summary {
            Some(summary) if summary.is_investor => summary,
            summary => {
                info!(stage = "non_investor_done", %id, "Not an investor; queued as to_do");
                return Ok(PipelineOutcome::NonInvestor {
                    identifier,
                    id,
                    summary,
                    links,
                });
            }
        };

        let name = summary.clean_name.clone().unwrap_or_else(|| {
            warn!(key = %identifier.value, "Investor has no clean name; researching by identifier");
            identifier.value.clone()
        });
        let research = self
            .researcher
            .research(&deep_research_prompt(&name, &summary.investor_types))
            .await?;
        info!(stage = "deep_researched", %id, chars = research.len(), "Deep research received");

        let schema = ExtractionSchema::build(summary.is_person());
        info!(stage = "schema_built", %id, fields = schema.fields().len(), "Extraction schema built");

        let raw = self
            .extractor
            .extract(
                EXTRACTION_SYSTEM_PROMPT,
                &extraction_user_message(&schema.render(), &research),
            )
            .await?;
        if let Some(message) = in_band_error(&raw) {
            return Err(InvestorError::Extraction(message));
        }
        info!(stage = "extracted", %id, "Structured extraction received");

        let update = enrichment_from_extraction(&raw, &summary, research);
        self.store.apply_enrichment(id, &update).await?;
        info!(stage = "finally_written", %id, "Investor record enriched");

        Ok(PipelineOutcome::Enriched {
            identifier,
            id,
            summary,
            links,
        })
    }
}
