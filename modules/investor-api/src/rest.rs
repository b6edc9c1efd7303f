use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, warn};

use investor_common::{CanonicalIdentifier, ClassificationSummary, InvestorError};
use investor_research::{PipelineOutcome, INPUT_REQUIRED};

use crate::AppState;

const NON_INVESTOR_MESSAGE: &str =
    "Not classified as an investor; saved with research_status to_do";

#[derive(Deserialize)]
pub struct ResearchRequest {
    input: Option<Value>,
    #[serde(rename = "skipExisting")]
    skip_existing: Option<bool>,
}

/// Error response: `{error, details?}` with the taxonomy's status.
pub struct ApiError(InvestorError);

impl From<InvestorError> for ApiError {
    fn from(err: InvestorError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "Investor research failed");
        } else {
            warn!(error = %self.0, "Investor research rejected");
        }

        let mut body = json!({ "error": self.0.public_message() });
        if let Some(details) = self.0.details() {
            body["details"] = Value::String(details.to_string());
        }
        (status, Json(body)).into_response()
    }
}

fn identifier_fields(identifier: &CanonicalIdentifier) -> Value {
    json!({
        "cleaned": identifier.value,
        "domain": identifier.domain_key(),
        "linkedinUrl": identifier.linkedin_key(),
    })
}

fn summary_json(summary: &ClassificationSummary) -> Value {
    json!({
        "entity_type": summary.entity_type,
        "is_investor": summary.is_investor,
        "investor_types": summary.is_investor.then_some(&summary.investor_types),
        "clean_name": summary.clean_name,
    })
}

/// Response body for a finished run.
pub fn outcome_json(outcome: &PipelineOutcome) -> Value {
    let mut body = identifier_fields(outcome.identifier());
    let extra = match outcome {
        PipelineOutcome::Skipped { reason, .. } => json!({
            "skipped": true,
            "reason": reason.as_str(),
        }),
        PipelineOutcome::NonInvestor { summary, links, .. } => json!({
            "summary": summary.as_ref().map(summary_json),
            "links": links,
            "research_status": "to_do",
            "message": NON_INVESTOR_MESSAGE,
        }),
        PipelineOutcome::Enriched { summary, links, .. } => json!({
            "summary": summary_json(summary),
            "links": links,
            "updated": true,
            "deep_research_complete": true,
        }),
    };
    if let (Value::Object(body), Value::Object(extra)) = (&mut body, extra) {
        body.extend(extra);
    }
    body
}

pub async fn research_investor(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ResearchRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        warn!(error = %rejection, "Malformed research request body");
        InvestorError::Input(INPUT_REQUIRED.to_string())
    })?;

    let input = request
        .input
        .as_ref()
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| InvestorError::Input(INPUT_REQUIRED.to_string()))?;

    let outcome = state.pipeline.run(input, request.skip_existing).await?;
    Ok(Json(outcome_json(&outcome)))
}
