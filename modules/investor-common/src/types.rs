use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// --- Identifiers ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    Domain,
    Linkedin,
}

/// Normalized lookup key for a company or person.
///
/// Domains carry no scheme and no `www.`; LinkedIn identifiers are the URL
/// path only (`in/jane-doe`, `company/acme`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalIdentifier {
    pub kind: IdentifierKind,
    pub value: String,
}

impl CanonicalIdentifier {
    pub fn domain(value: impl Into<String>) -> Self {
        Self {
            kind: IdentifierKind::Domain,
            value: value.into(),
        }
    }

    pub fn linkedin(path: impl Into<String>) -> Self {
        Self {
            kind: IdentifierKind::Linkedin,
            value: path.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn domain_key(&self) -> Option<&str> {
        (self.kind == IdentifierKind::Domain).then_some(self.value.as_str())
    }

    pub fn linkedin_key(&self) -> Option<&str> {
        (self.kind == IdentifierKind::Linkedin).then_some(self.value.as_str())
    }

    /// Fully-qualified URL handed to the content-analysis service.
    pub fn url(&self) -> String {
        match self.kind {
            IdentifierKind::Domain => format!("https://{}", self.value),
            IdentifierKind::Linkedin => format!("https://www.linkedin.com/{}", self.value),
        }
    }
}

impl fmt::Display for CanonicalIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IdentifierKind::Domain => write!(f, "domain:{}", self.value),
            IdentifierKind::Linkedin => write!(f, "linkedin:{}", self.value),
        }
    }
}

// --- Classification ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum EntityType {
    Person,
    Organization,
}

impl EntityType {
    /// Lenient label parse. Anything that is not recognisably a person is
    /// treated as an organization.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("person") {
            EntityType::Person
        } else {
            EntityType::Organization
        }
    }

    pub fn record_type(self) -> RecordType {
        match self {
            EntityType::Person => RecordType::Person,
            EntityType::Organization => RecordType::Firm,
        }
    }
}

/// Investor categories the classifier may assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum InvestorType {
    #[serde(rename = "Venture Capital")]
    VentureCapital,
    #[serde(rename = "Angel Investor")]
    AngelInvestor,
    #[serde(rename = "Angel Network")]
    AngelNetwork,
    #[serde(rename = "Private Equity")]
    PrivateEquity,
    #[serde(rename = "Growth Equity")]
    GrowthEquity,
    #[serde(rename = "Corporate Venture Capital")]
    CorporateVentureCapital,
    #[serde(rename = "Family Office")]
    FamilyOffice,
    #[serde(rename = "Accelerator")]
    Accelerator,
    #[serde(rename = "Incubator")]
    Incubator,
    #[serde(rename = "Venture Studio")]
    VentureStudio,
    #[serde(rename = "Syndicate")]
    Syndicate,
    #[serde(rename = "Fund of Funds")]
    FundOfFunds,
    #[serde(rename = "Limited Partner")]
    LimitedPartner,
    #[serde(rename = "Hedge Fund")]
    HedgeFund,
    #[serde(rename = "Venture Debt")]
    VentureDebt,
    #[serde(rename = "Sovereign Wealth Fund")]
    SovereignWealthFund,
    #[serde(rename = "Impact Investor")]
    ImpactInvestor,
    #[serde(rename = "Crowdfunding Platform")]
    CrowdfundingPlatform,
    #[serde(rename = "Scout")]
    Scout,
}

impl InvestorType {
    pub const ALL: [InvestorType; 19] = [
        InvestorType::VentureCapital,
        InvestorType::AngelInvestor,
        InvestorType::AngelNetwork,
        InvestorType::PrivateEquity,
        InvestorType::GrowthEquity,
        InvestorType::CorporateVentureCapital,
        InvestorType::FamilyOffice,
        InvestorType::Accelerator,
        InvestorType::Incubator,
        InvestorType::VentureStudio,
        InvestorType::Syndicate,
        InvestorType::FundOfFunds,
        InvestorType::LimitedPartner,
        InvestorType::HedgeFund,
        InvestorType::VentureDebt,
        InvestorType::SovereignWealthFund,
        InvestorType::ImpactInvestor,
        InvestorType::CrowdfundingPlatform,
        InvestorType::Scout,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InvestorType::VentureCapital => "Venture Capital",
            InvestorType::AngelInvestor => "Angel Investor",
            InvestorType::AngelNetwork => "Angel Network",
            InvestorType::PrivateEquity => "Private Equity",
            InvestorType::GrowthEquity => "Growth Equity",
            InvestorType::CorporateVentureCapital => "Corporate Venture Capital",
            InvestorType::FamilyOffice => "Family Office",
            InvestorType::Accelerator => "Accelerator",
            InvestorType::Incubator => "Incubator",
            InvestorType::VentureStudio => "Venture Studio",
            InvestorType::Syndicate => "Syndicate",
            InvestorType::FundOfFunds => "Fund of Funds",
            InvestorType::LimitedPartner => "Limited Partner",
            InvestorType::HedgeFund => "Hedge Fund",
            InvestorType::VentureDebt => "Venture Debt",
            InvestorType::SovereignWealthFund => "Sovereign Wealth Fund",
            InvestorType::ImpactInvestor => "Impact Investor",
            InvestorType::CrowdfundingPlatform => "Crowdfunding Platform",
            InvestorType::Scout => "Scout",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.label()).collect()
    }
}

/// The classifier's verdict for one identifier. Projected into the base
/// record; never stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    pub entity_type: EntityType,
    /// True only when the service flagged an investor *and* named at least
    /// one investor type.
    pub is_investor: bool,
    pub investor_types: Vec<String>,
    pub clean_name: Option<String>,
}

impl ClassificationSummary {
    pub fn is_person(&self) -> bool {
        self.entity_type == EntityType::Person
    }
}

/// A crawled sub-page reported by the content-analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CrawledPage {
    pub url: Option<String>,
    pub title: Option<String>,
}

/// Classification stage output: the parsed summary (if any) plus the
/// sub-pages the service crawled.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub summary: Option<ClassificationSummary>,
    pub subpages: Vec<CrawledPage>,
}

// --- Records ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Person,
    Firm,
}

impl RecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::Person => "person",
            RecordType::Firm => "firm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResearchStatus {
    #[serde(rename = "to_do")]
    ToDo,
}

impl ResearchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ResearchStatus::ToDo => "to_do",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    DomainExists,
    LinkedinExists,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::DomainExists => "domain_exists",
            SkipReason::LinkedinExists => "linkedin_exists",
        }
    }
}

/// Minimal fields written right after classification.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseRecord {
    pub record_type: RecordType,
    pub name: Option<String>,
    pub domain: Option<String>,
    pub linkedin_url: Option<String>,
    pub investor_type: Option<Vec<String>>,
    pub links: Vec<String>,
    pub research_status: Option<ResearchStatus>,
}

impl BaseRecord {
    /// Project a classification onto the base row for `identifier`.
    /// Exactly one of `domain` / `linkedin_url` is populated.
    pub fn project(
        identifier: &CanonicalIdentifier,
        summary: Option<&ClassificationSummary>,
        links: Vec<String>,
    ) -> Self {
        let is_investor = summary.is_some_and(|s| s.is_investor);
        Self {
            record_type: summary
                .map(|s| s.entity_type.record_type())
                .unwrap_or(RecordType::Firm),
            name: summary.and_then(|s| s.clean_name.clone()),
            domain: identifier.domain_key().map(str::to_string),
            linkedin_url: identifier.linkedin_key().map(str::to_string),
            investor_type: summary
                .filter(|s| s.is_investor)
                .map(|s| s.investor_types.clone()),
            links,
            research_status: (!is_investor).then_some(ResearchStatus::ToDo),
        }
    }
}

/// Fields written by the deep-research/extraction phase. Every value has
/// already been type-checked; `None` means unknown and is stored as null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentUpdate {
    pub investor_type: Vec<String>,
    pub email: Option<String>,
    pub twitter_url: Option<String>,
    pub active: Option<bool>,
    /// Role is only written for person subjects; for firms the stored
    /// column is left untouched.
    pub writes_role: bool,
    pub role: Option<String>,
    pub hq_state: Option<String>,
    pub hq_country: Option<String>,
    pub fund_size_usd: Option<f64>,
    pub check_size_min_usd: Option<f64>,
    pub check_size_max_usd: Option<f64>,
    pub investment_stages: Option<Vec<String>>,
    pub investment_industries: Option<Vec<String>>,
    pub investment_geographies: Option<Vec<String>>,
    pub investment_thesis: Option<String>,
    pub notable_investments: Option<Vec<String>>,
    pub deep_research: String,
    pub leads_round: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investor_summary() -> ClassificationSummary {
        ClassificationSummary {
            entity_type: EntityType::Organization,
            is_investor: true,
            investor_types: vec!["Venture Capital".to_string()],
            clean_name: Some("Sequoia Capital".to_string()),
        }
    }

    #[test]
    fn identifier_renders_service_urls() {
        assert_eq!(
            CanonicalIdentifier::domain("sequoia.com").url(),
            "https://sequoia.com"
        );
        assert_eq!(
            CanonicalIdentifier::linkedin("in/jane").url(),
            "https://www.linkedin.com/in/jane"
        );
    }

    #[test]
    fn identifier_exposes_exactly_one_key() {
        let domain = CanonicalIdentifier::domain("acme.com");
        assert_eq!(domain.domain_key(), Some("acme.com"));
        assert_eq!(domain.linkedin_key(), None);

        let linkedin = CanonicalIdentifier::linkedin("company/acme");
        assert_eq!(linkedin.domain_key(), None);
        assert_eq!(linkedin.linkedin_key(), Some("company/acme"));
    }

    #[test]
    fn entity_label_parse_is_lenient() {
        assert_eq!(EntityType::from_label("person"), EntityType::Person);
        assert_eq!(EntityType::from_label(" Person "), EntityType::Person);
        assert_eq!(EntityType::from_label("Organization"), EntityType::Organization);
        assert_eq!(EntityType::from_label("fund"), EntityType::Organization);
    }

    #[test]
    fn investor_type_labels_match_serde_names() {
        for kind in InvestorType::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.label());
        }
    }

    #[test]
    fn project_investor_base_row() {
        let base = BaseRecord::project(
            &CanonicalIdentifier::domain("sequoia.com"),
            Some(&investor_summary()),
            vec!["[Team](https://sequoia.com/team)".to_string()],
        );

        assert_eq!(base.record_type, RecordType::Firm);
        assert_eq!(base.name.as_deref(), Some("Sequoia Capital"));
        assert_eq!(base.domain.as_deref(), Some("sequoia.com"));
        assert_eq!(base.linkedin_url, None);
        assert_eq!(base.investor_type, Some(vec!["Venture Capital".to_string()]));
        assert_eq!(base.research_status, None);
    }

    #[test]
    fn project_without_summary_is_a_todo_firm() {
        let base = BaseRecord::project(&CanonicalIdentifier::linkedin("in/jane"), None, vec![]);

        assert_eq!(base.record_type, RecordType::Firm);
        assert_eq!(base.name, None);
        assert_eq!(base.domain, None);
        assert_eq!(base.linkedin_url.as_deref(), Some("in/jane"));
        assert_eq!(base.investor_type, None);
        assert_eq!(base.research_status, Some(ResearchStatus::ToDo));
    }

    #[test]
    fn wire_names() {
        assert_eq!(serde_json::to_value(SkipReason::LinkedinExists).unwrap(), "linkedin_exists");
        assert_eq!(serde_json::to_value(ResearchStatus::ToDo).unwrap(), "to_do");
        assert_eq!(serde_json::to_value(RecordType::Firm).unwrap(), "firm");
        assert_eq!(serde_json::to_value(EntityType::Person).unwrap(), "Person");
    }
}
