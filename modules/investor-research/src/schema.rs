//! Extraction schema descriptor.
//!
//! The field set depends on whether the subject is a person, so the schema
//! is a runtime value built from that flag and rendered to prompt text by
//! [`ExtractionSchema::render`].

use serde::Serialize;

use investor_common::InvestorType;

use crate::vocab::{INVESTMENT_INDUSTRIES, INVESTMENT_STAGES, ROLES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    StringArray,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaField {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(rename = "allowed_values", skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<&'static str>,
    #[serde(rename = "format", skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl SchemaField {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            allowed: Vec::new(),
            hint: None,
        }
    }

    fn allowed(mut self, values: &[&'static str]) -> Self {
        self.allowed = values.to_vec();
        self
    }

    fn hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }
}

const ISO_SUBDIVISION: &str = "ISO 3166-2 subdivision code, e.g. US-CA";
const ISO_COUNTRY: &str = "ISO 3166 alpha-2 country code, e.g. US";
const ISO_REGIONS: &str = "ISO 3166-2 codes (country or subdivision), e.g. US, GB, US-NY";
const MARKDOWN_LINK: &str = "each entry formatted as [name](url)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionSchema {
    fields: Vec<SchemaField>,
}

impl ExtractionSchema {
    pub fn build(is_person: bool) -> Self {
        use FieldKind::*;

        let mut fields = vec![
            SchemaField::new("investor_type", StringArray).allowed(&InvestorType::labels()),
            SchemaField::new("emails", StringArray).hint("public contact email addresses"),
            SchemaField::new("twitter_url", String).hint("full profile URL"),
            SchemaField::new("active", Boolean).hint("currently making new investments"),
        ];

        if is_person {
            fields.push(SchemaField::new("role", String).allowed(&ROLES));
        }

        fields.extend([
            SchemaField::new("hq_state", String).hint(ISO_SUBDIVISION),
            SchemaField::new("hq_country", String).hint(ISO_COUNTRY),
            SchemaField::new("fund_size_usd", Number).hint("plain number in USD, no units"),
            SchemaField::new("check_size_min_usd", Number).hint("plain number in USD, no units"),
            SchemaField::new("check_size_max_usd", Number).hint("plain number in USD, no units"),
            SchemaField::new("investment_stages", StringArray).allowed(&INVESTMENT_STAGES),
            SchemaField::new("investment_industries", StringArray).allowed(INVESTMENT_INDUSTRIES),
            SchemaField::new("investment_geographies", StringArray).hint(ISO_REGIONS),
            SchemaField::new("investment_thesis", String),
            SchemaField::new("notable_investments", StringArray).hint(MARKDOWN_LINK),
            SchemaField::new("leads_round", Boolean).hint("typically leads funding rounds"),
        ]);

        Self { fields }
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Prompt form of the schema: a pretty-printed JSON field list.
    pub fn render(&self) -> String {
        serde_json::to_string_pretty(&self.fields).unwrap_or_default()
    }
}
