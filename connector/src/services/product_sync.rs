//! Product catalog sync
//!
//! Pulls the remote catalog for every sync-enabled brand and upserts the
//! local remote-product mirror. One brand failing (transport, HTTP, or an
//! application-level `success: false`) never aborts the batch.

use crate::client::ClientError;
use crate::state::AppState;
use crate::store::UpsertOutcome;
use crate::store::models::Brand;

/// Outcome of one catalog sync run
#[derive(Debug, Default, Clone, Copy)]
pub struct SyncReport {
    pub brands_total: usize,
    pub brands_failed: usize,
    pub created: usize,
    pub updated: usize,
}

/// Sync the catalog of every sync-enabled brand
pub async fn sync_products(state: &AppState) -> SyncReport {
    let brands = state.store.brands.find_sync_enabled();
    let mut report = SyncReport {
        brands_total: brands.len(),
        ..Default::default()
    };

    for brand in &brands {
        tracing::info!(brand = %brand.name, "Syncing products");
        match sync_brand(state, brand).await {
            Ok((created, updated)) => {
                report.created += created;
                report.updated += updated;
                tracing::info!(brand = %brand.name, created, updated, "Catalog sync done");
            }
            Err(e) => {
                report.brands_failed += 1;
                tracing::error!(brand = %brand.name, error = %e, "Catalog sync failed");
            }
        }
    }

    report
}

async fn sync_brand(state: &AppState, brand: &Brand) -> Result<(usize, usize), ClientError> {
    let envelope = state.client_for(brand).fetch_products().await?;
    if !envelope.success {
        return Err(ClientError::Request(
            "remote reported success=false".into(),
        ));
    }

    let mut created = 0;
    let mut updated = 0;
    for entry in &envelope.data {
        match state
            .store
            .remote_products
            .upsert(brand.concept_id, entry.id, &entry.name)
        {
            UpsertOutcome::Created => {
                created += 1;
                tracing::debug!(brand = %brand.name, product = %entry.name, remote_id = entry.id, "Mirror entry created");
            }
            UpsertOutcome::Updated => {
                updated += 1;
                tracing::debug!(brand = %brand.name, product = %entry.name, remote_id = entry.id, "Mirror entry updated");
            }
        }
    }
    Ok((created, updated))
}
