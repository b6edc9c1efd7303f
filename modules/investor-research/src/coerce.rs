//! Defensive field coercion for extraction output.
//!
//! Nothing in the completion is trusted: each field is type-checked on its
//! own and anything of the wrong shape becomes `None` (stored as null).

use serde_json::Value;
use tracing::warn;

use investor_common::{ClassificationSummary, EnrichmentUpdate};

/// Message of an in-band `error` payload in a 200 completion body.
/// `null`, `false` and blank strings mean no error.
pub fn in_band_error(raw: &Value) -> Option<String> {
    match raw.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.trim().is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(
            other
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
        ),
    }
}

fn text(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn number(raw: &Value, key: &str) -> Option<f64> {
    let value = raw.get(key)?;
    if !value.is_number() {
        if !value.is_null() {
            warn!(field = key, value = %value, "Dropping non-numeric value");
        }
        return None;
    }
    value.as_f64()
}

fn flag(raw: &Value, key: &str) -> Option<bool> {
    raw.get(key).and_then(Value::as_bool)
}

/// Arrays whose entries are all strings; anything else is `None`.
fn string_list(raw: &Value, key: &str) -> Option<Vec<String>> {
    let items = raw.get(key)?.as_array()?;
    items
        .iter()
        .map(|item| item.as_str().map(|s| s.trim().to_string()))
        .collect::<Option<Vec<_>>>()
        .map(|list| list.into_iter().filter(|s| !s.is_empty()).collect())
}

/// `emails` may be a list or a single string; stored as one comma-joined value.
fn emails(raw: &Value) -> Option<String> {
    let joined = match raw.get("emails")? {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    (!joined.is_empty()).then_some(joined)
}

/// Build the enrichment write from an extraction object.
pub fn enrichment_from_extraction(
    raw: &Value,
    summary: &ClassificationSummary,
    deep_research: String,
) -> EnrichmentUpdate {
    let investor_type = match string_list(raw, "investor_type") {
        Some(types) if !types.is_empty() => types,
        _ => summary.investor_types.clone(),
    };

    let writes_role = summary.is_person();

    EnrichmentUpdate {
        investor_type,
        email: emails(raw),
        twitter_url: text(raw, "twitter_url"),
        active: flag(raw, "active"),
        writes_role,
        role: if writes_role { text(raw, "role") } else { None },
        hq_state: text(raw, "hq_state"),
        hq_country: text(raw, "hq_country"),
        fund_size_usd: number(raw, "fund_size_usd"),
        check_size_min_usd: number(raw, "check_size_min_usd"),
        check_size_max_usd: number(raw, "check_size_max_usd"),
        investment_stages: string_list(raw, "investment_stages"),
        investment_industries: string_list(raw, "investment_industries"),
        investment_geographies: string_list(raw, "investment_geographies"),
        investment_thesis: text(raw, "investment_thesis"),
        notable_investments: string_list(raw, "notable_investments"),
        deep_research,
        leads_round: flag(raw, "leads_round"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use investor_common::EntityType;
    use serde_json::json;

    fn firm() -> ClassificationSummary {
        ClassificationSummary {
            entity_type: EntityType::Organization,
            is_investor: true,
            investor_types: vec!["Venture Capital".to_string()],
            clean_name: Some("Sequoia Capital".to_string()),
        }
    }

    fn person() -> ClassificationSummary {
        ClassificationSummary {
            entity_type: EntityType::Person,
            investor_types: vec!["Angel Investor".to_string()],
            ..firm()
        }
    }

    #[test]
    fn malformed_numbers_become_null() {
        let raw = json!({"fund_size_usd": "10M", "check_size_min_usd": 250000, "check_size_max_usd": 1.5e6});
        let update = enrichment_from_extraction(&raw, &firm(), "notes".into());

        assert_eq!(update.fund_size_usd, None);
        assert_eq!(update.check_size_min_usd, Some(250000.0));
        assert_eq!(update.check_size_max_usd, Some(1_500_000.0));
    }

    #[test]
    fn emails_are_joined() {
        let raw = json!({"emails": ["a@sequoia.com", " b@sequoia.com ", 3]});
        let update = enrichment_from_extraction(&raw, &firm(), String::new());
        assert_eq!(update.email.as_deref(), Some("a@sequoia.com, b@sequoia.com"));

        let raw = json!({"emails": "solo@sequoia.com"});
        let update = enrichment_from_extraction(&raw, &firm(), String::new());
        assert_eq!(update.email.as_deref(), Some("solo@sequoia.com"));

        for bad in [json!({"emails": []}), json!({"emails": 42}), json!({})] {
            assert_eq!(enrichment_from_extraction(&bad, &firm(), String::new()).email, None);
        }
    }

    #[test]
    fn non_array_lists_become_null() {
        let raw = json!({
            "investment_stages": "seed",
            "investment_industries": ["fintech", {"x": 1}],
            "investment_geographies": ["US", "GB"]
        });
        let update = enrichment_from_extraction(&raw, &firm(), String::new());

        assert_eq!(update.investment_stages, None);
        assert_eq!(update.investment_industries, None);
        assert_eq!(update.investment_geographies, Some(vec!["US".to_string(), "GB".to_string()]));
    }

    #[test]
    fn investor_type_falls_back_to_classification() {
        let update = enrichment_from_extraction(&json!({"investor_type": "VC"}), &firm(), String::new());
        assert_eq!(update.investor_type, vec!["Venture Capital"]);

        let raw = json!({"investor_type": ["Venture Capital", "Growth Equity"]});
        let update = enrichment_from_extraction(&raw, &firm(), String::new());
        assert_eq!(update.investor_type, vec!["Venture Capital", "Growth Equity"]);
    }

    #[test]
    fn role_only_written_for_people() {
        let raw = json!({"role": "General Partner"});

        let firm_update = enrichment_from_extraction(&raw, &firm(), String::new());
        assert!(!firm_update.writes_role);
        assert_eq!(firm_update.role, None);

        let person_update = enrichment_from_extraction(&raw, &person(), String::new());
        assert!(person_update.writes_role);
        assert_eq!(person_update.role.as_deref(), Some("General Partner"));
    }

    #[test]
    fn wrong_typed_scalars_are_dropped() {
        let raw = json!({"active": "yes", "leads_round": true, "hq_country": 1, "twitter_url": ""});
        let update = enrichment_from_extraction(&raw, &firm(), "text".into());

        assert_eq!(update.active, None);
        assert_eq!(update.leads_round, Some(true));
        assert_eq!(update.hq_country, None);
        assert_eq!(update.twitter_url, None);
        assert_eq!(update.deep_research, "text");
    }

    #[test]
    fn detects_in_band_errors() {
        assert_eq!(
            in_band_error(&json!({"error": {"message": "quota"}})).as_deref(),
            Some("quota")
        );
        assert_eq!(in_band_error(&json!({"error": "boom"})).as_deref(), Some("boom"));
        assert_eq!(in_band_error(&json!({"error": null})), None);
        assert_eq!(in_band_error(&json!({"error": false})), None);
        assert_eq!(in_band_error(&json!({"error": ""})), None);
        assert_eq!(in_band_error(&json!({"error": "  "})), None);
        assert_eq!(in_band_error(&json!({"error": true})).as_deref(), Some("true"));
        assert_eq!(in_band_error(&json!({"hq_country": "US"})), None);
    }
}
