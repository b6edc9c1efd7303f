use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use investor_common::{BaseRecord, EnrichmentUpdate};

/// A row of the `investors` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct InvestorRecord {
    pub id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: Option<String>,
    pub domain: Option<String>,
    pub linkedin_url: Option<String>,
    pub investor_type: Option<Vec<String>>,
    pub links: Vec<String>,
    pub research_status: Option<String>,
    pub email: Option<String>,
    pub twitter_url: Option<String>,
    pub active: Option<bool>,
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
    pub deep_research: Option<String>,
    pub leads_round: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InvestorRecord {
    /// A freshly inserted base row; enrichment columns start out null.
    pub fn new_base(id: Uuid, base: &BaseRecord, now: DateTime<Utc>) -> Self {
        let mut record = Self {
            id,
            record_type: String::new(),
            name: None,
            domain: None,
            linkedin_url: None,
            investor_type: None,
            links: Vec::new(),
            research_status: None,
            email: None,
            twitter_url: None,
            active: None,
            role: None,
            hq_state: None,
            hq_country: None,
            fund_size_usd: None,
            check_size_min_usd: None,
            check_size_max_usd: None,
            investment_stages: None,
            investment_industries: None,
            investment_geographies: None,
            investment_thesis: None,
            notable_investments: None,
            deep_research: None,
            leads_round: None,
            created_at: now,
            updated_at: now,
        };
        record.apply_base(base, now);
        record
    }

    pub fn apply_base(&mut self, base: &BaseRecord, now: DateTime<Utc>) {
        self.record_type = base.record_type.as_str().to_string();
        self.name = base.name.clone();
        self.domain = base.domain.clone();
        self.linkedin_url = base.linkedin_url.clone();
        self.investor_type = base.investor_type.clone();
        self.links = base.links.clone();
        self.research_status = base.research_status.map(|s| s.as_str().to_string());
        self.updated_at = now;
    }

    pub fn apply_enrichment(&mut self, update: &EnrichmentUpdate, now: DateTime<Utc>) {
        self.investor_type = Some(update.investor_type.clone());
        self.email = update.email.clone();
        self.twitter_url = update.twitter_url.clone();
        self.active = update.active;
        if update.writes_role {
            self.role = update.role.clone();
        }
        self.hq_state = update.hq_state.clone();
        self.hq_country = update.hq_country.clone();
        self.fund_size_usd = update.fund_size_usd;
        self.check_size_min_usd = update.check_size_min_usd;
        self.check_size_max_usd = update.check_size_max_usd;
        self.investment_stages = update.investment_stages.clone();
        self.investment_industries = update.investment_industries.clone();
        self.investment_geographies = update.investment_geographies.clone();
        self.investment_thesis = update.investment_thesis.clone();
        self.notable_investments = update.notable_investments.clone();
        self.deep_research = Some(update.deep_research.clone());
        self.leads_round = update.leads_round;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use investor_common::{RecordType, ResearchStatus};

    fn base() -> BaseRecord {
        BaseRecord {
            record_type: RecordType::Person,
            name: Some("Jane Doe".to_string()),
            domain: None,
            linkedin_url: Some("in/jane-doe".to_string()),
            investor_type: None,
            links: vec![],
            research_status: Some(ResearchStatus::ToDo),
        }
    }

    #[test]
    fn base_row_stores_wire_labels() {
        let record = InvestorRecord::new_base(Uuid::new_v4(), &base(), Utc::now());
        assert_eq!(record.record_type, "person");
        assert_eq!(record.research_status.as_deref(), Some("to_do"));
        assert_eq!(record.linkedin_url.as_deref(), Some("in/jane-doe"));
        assert_eq!(record.deep_research, None);
    }

    #[test]
    fn enrichment_leaves_role_alone_unless_flagged() {
        let mut record = InvestorRecord::new_base(Uuid::new_v4(), &base(), Utc::now());
        record.role = Some("Partner".to_string());

        let update = EnrichmentUpdate {
            deep_research: "notes".to_string(),
            role: Some("Scout".to_string()),
            writes_role: false,
            ..Default::default()
        };
        record.apply_enrichment(&update, Utc::now());
        assert_eq!(record.role.as_deref(), Some("Partner"));
        assert_eq!(record.deep_research.as_deref(), Some("notes"));

        let update = EnrichmentUpdate {
            writes_role: true,
            ..update
        };
        record.apply_enrichment(&update, Utc::now());
        assert_eq!(record.role.as_deref(), Some("Scout"));
    }
}
