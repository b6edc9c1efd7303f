use uuid::Uuid;

use investor_common::{CanonicalIdentifier, Result, SkipReason};

use crate::traits::InvestorStore;

/// Look up a stored row for `identifier`: domain first, then LinkedIn path.
pub async fn find_existing(
    store: &dyn InvestorStore,
    identifier: &CanonicalIdentifier,
) -> Result<Option<(Uuid, SkipReason)>> {
    if let Some(domain) = identifier.domain_key() {
        if let Some(id) = store.find_by_domain(domain).await? {
            return Ok(Some((id, SkipReason::DomainExists)));
        }
    }
    if let Some(path) = identifier.linkedin_key() {
        if let Some(id) = store.find_by_linkedin(path).await? {
            return Ok(Some((id, SkipReason::LinkedinExists)));
        }
    }
    Ok(None)
}

/// Dedup gate. `None` means the run should proceed.
pub async fn check(
    store: &dyn InvestorStore,
    identifier: &CanonicalIdentifier,
    skip_existing: bool,
) -> Result<Option<SkipReason>> {
    if !skip_existing {
        return Ok(None);
    }
    Ok(find_existing(store, identifier)
        .await?
        .map(|(_, reason)| reason))
}
