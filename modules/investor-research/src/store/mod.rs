//! Investor record store: row type, Postgres adapter, and the
//! resolve-then-write helper shared by every backend.

mod postgres;
mod record;

pub use postgres::PgInvestorStore;
pub use record::InvestorRecord;

use tracing::info;
use uuid::Uuid;

use investor_common::{BaseRecord, CanonicalIdentifier, Result};

use crate::dedup::find_existing;
use crate::traits::InvestorStore;

/// Write the base row for `identifier`, updating the existing row when the
/// identifier is already stored. Returns the row id.
pub async fn upsert_base(
    store: &dyn InvestorStore,
    identifier: &CanonicalIdentifier,
    base: &BaseRecord,
) -> Result<Uuid> {
    match find_existing(store, identifier).await? {
        Some((id, _)) => {
            store.update_base(id, base).await?;
            info!(%id, identifier = %identifier, "Updated existing base row");
            Ok(id)
        }
        None => {
            let id = store.insert_base(base).await?;
            info!(%id, identifier = %identifier, "Inserted new base row");
            Ok(id)
        }
    }
}
