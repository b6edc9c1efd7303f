//! Postgres store against a live database.
//!
//! Requirements:
//!   - DATABASE_URL env var (Postgres); the test is skipped otherwise

use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use investor_common::{BaseRecord, EnrichmentUpdate, RecordType, ResearchStatus};
use investor_research::traits::InvestorStore;
use investor_research::PgInvestorStore;

async fn store() -> Option<PgInvestorStore> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new().max_connections(4).connect(&url).await.ok()?;
    sqlx::migrate!("../../migrations").run(&pool).await.ok()?;
    Some(PgInvestorStore::new(pool))
}

fn base(domain: &str) -> BaseRecord {
    BaseRecord {
        record_type: RecordType::Firm,
        name: Some("Test Ventures".to_string()),
        domain: Some(domain.to_string()),
        linkedin_url: None,
        investor_type: Some(vec!["Venture Capital".to_string()]),
        links: vec!["[Team](https://example.com/team)".to_string()],
        research_status: None,
    }
}

#[tokio::test]
async fn conflicting_insert_resolves_to_existing_row() {
    let Some(store) = store().await else {
        eprintln!("Skipping: DATABASE_URL not available");
        return;
    };
    let domain = format!("{}.test", Uuid::new_v4());

    let first = store.insert_base(&base(&domain)).await.unwrap();
    let second = store
        .insert_base(&BaseRecord {
            research_status: Some(ResearchStatus::ToDo),
            ..base(&domain)
        })
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(store.find_by_domain(&domain).await.unwrap(), Some(first));
    let row = store.get(first).await.unwrap().unwrap();
    assert_eq!(row.research_status.as_deref(), Some("to_do"));
}

#[tokio::test]
async fn enrichment_updates_in_place() {
    let Some(store) = store().await else {
        eprintln!("Skipping: DATABASE_URL not available");
        return;
    };
    let domain = format!("{}.test", Uuid::new_v4());
    let id = store.insert_base(&base(&domain)).await.unwrap();

    store
        .apply_enrichment(
            id,
            &EnrichmentUpdate {
                investor_type: vec!["Venture Capital".to_string()],
                hq_country: Some("US".to_string()),
                fund_size_usd: Some(2.5e8),
                investment_stages: Some(vec!["seed".to_string()]),
                role: Some("Partner".to_string()),
                writes_role: false,
                deep_research: "notes".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let row = store.get(id).await.unwrap().unwrap();
    assert_eq!(row.record_type, "firm");
    assert_eq!(row.hq_country.as_deref(), Some("US"));
    assert_eq!(row.fund_size_usd, Some(2.5e8));
    assert_eq!(row.investment_stages, Some(vec!["seed".to_string()]));
    assert_eq!(row.role, None);
    assert_eq!(row.deep_research.as_deref(), Some("notes"));
}
