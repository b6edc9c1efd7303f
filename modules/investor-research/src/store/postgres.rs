use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use investor_common::{BaseRecord, EnrichmentUpdate, InvestorError, Result};

use super::record::InvestorRecord;
use crate::traits::InvestorStore;

fn persistence(err: sqlx::Error) -> InvestorError {
    InvestorError::Persistence(err.to_string())
}

/// [`InvestorStore`] over the Postgres `investors` table.
///
/// `domain` and `linkedin_url` each carry a partial unique index, so a
/// losing concurrent insert is turned into an update of the winning row.
#[derive(Clone)]
pub struct PgInvestorStore {
    pool: PgPool,
}

impl PgInvestorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Full row by id. The pipeline never reads rows back; this is for
    /// inspection and the live-database tests.
    pub async fn get(&self, id: Uuid) -> Result<Option<InvestorRecord>> {
        sqlx::query_as::<_, InvestorRecord>("SELECT * FROM investors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence)
    }

    async fn find_conflicting(&self, record: &BaseRecord) -> Result<Option<Uuid>> {
        if let Some(domain) = &record.domain {
            if let Some(id) = self.find_by_domain(domain).await? {
                return Ok(Some(id));
            }
        }
        match &record.linkedin_url {
            Some(path) => self.find_by_linkedin(path).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl InvestorStore for PgInvestorStore {
    async fn find_by_domain(&self, domain: &str) -> Result<Option<Uuid>> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM investors WHERE domain = $1 LIMIT 1")
            .bind(domain)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence)
    }

    async fn find_by_linkedin(&self, path: &str) -> Result<Option<Uuid>> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM investors WHERE linkedin_url = $1 LIMIT 1")
            .bind(path)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence)
    }

    async fn insert_base(&self, record: &BaseRecord) -> Result<Uuid> {
        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO investors (id, type, name, domain, linkedin_url, investor_type, links, research_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT DO NOTHING
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.record_type.as_str())
        .bind(&record.name)
        .bind(&record.domain)
        .bind(&record.linkedin_url)
        .bind(&record.investor_type)
        .bind(&record.links)
        .bind(record.research_status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence)?;

        if let Some(id) = inserted {
            debug!(%id, "Inserted investor base row");
            return Ok(id);
        }

        // A concurrent run inserted the same identifier first.
        let id = self.find_conflicting(record).await?.ok_or_else(|| {
            InvestorError::Persistence("insert conflicted but no existing row was found".to_string())
        })?;
        warn!(%id, "Insert lost a race for the same identifier; updating existing row");
        self.update_base(id, record).await?;
        Ok(id)
    }

    async fn update_base(&self, id: Uuid, record: &BaseRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE investors
            SET type = $2, name = $3, domain = $4, linkedin_url = $5,
                investor_type = $6, links = $7, research_status = $8, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(record.record_type.as_str())
        .bind(&record.name)
        .bind(&record.domain)
        .bind(&record.linkedin_url)
        .bind(&record.investor_type)
        .bind(&record.links)
        .bind(record.research_status.map(|s| s.as_str()))
        .execute(&self.pool)
        .await
        .map_err(persistence)?;

        if result.rows_affected() == 0 {
            return Err(InvestorError::Persistence(format!("investor {id} not found")));
        }
        Ok(())
    }

    async fn apply_enrichment(&self, id: Uuid, update: &EnrichmentUpdate) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE investors
            SET investor_type = $2,
                email = $3,
                twitter_url = $4,
                active = $5,
                role = CASE WHEN $6 THEN $7 ELSE role END,
                hq_state = $8,
                hq_country = $9,
                fund_size_usd = $10,
                check_size_min_usd = $11,
                check_size_max_usd = $12,
                investment_stages = $13,
                investment_industries = $14,
                investment_geographies = $15,
                investment_thesis = $16,
                notable_investments = $17,
                deep_research = $18,
                leads_round = $19,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&update.investor_type)
        .bind(&update.email)
        .bind(&update.twitter_url)
        .bind(update.active)
        .bind(update.writes_role)
        .bind(&update.role)
        .bind(&update.hq_state)
        .bind(&update.hq_country)
        .bind(update.fund_size_usd)
        .bind(update.check_size_min_usd)
        .bind(update.check_size_max_usd)
        .bind(&update.investment_stages)
        .bind(&update.investment_industries)
        .bind(&update.investment_geographies)
        .bind(&update.investment_thesis)
        .bind(&update.notable_investments)
        .bind(&update.deep_research)
        .bind(update.leads_round)
        .execute(&self.pool)
        .await
        .map_err(persistence)?;

        if result.rows_affected() == 0 {
            return Err(InvestorError::Persistence(format!("investor {id} not found")));
        }
        Ok(())
    }
}
