//! Remote product mirror repository
//!
//! Local cache of the Ordable catalog, keyed by (concept_id, remote_id).
//! Refreshed on every catalog sync; entries are upserted, never deleted.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::util::snowflake_id;

use super::models::RemoteProduct;

/// Whether an upsert created a new mirror entry or refreshed an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

#[derive(Clone, Default)]
pub struct RemoteProductRepository {
    inner: Arc<RwLock<HashMap<i64, RemoteProduct>>>,
}

impl RemoteProductRepository {
    /// Upsert one catalog entry under its (concept, remote id) key
    pub fn upsert(&self, concept_id: i64, remote_id: i64, name: &str) -> UpsertOutcome {
        let mut map = self.inner.write();
        if let Some(existing) = map
            .values_mut()
            .find(|p| p.concept_id == concept_id && p.remote_id == remote_id)
        {
            existing.name = name.to_string();
            return UpsertOutcome::Updated;
        }
        let id = snowflake_id();
        map.insert(
            id,
            RemoteProduct {
                id,
                name: name.to_string(),
                concept_id,
                remote_id,
            },
        );
        UpsertOutcome::Created
    }

    /// Mirror lookup used by the outbound payload builder
    pub fn find_by_name_and_concept(&self, name: &str, concept_id: i64) -> Option<RemoteProduct> {
        self.inner
            .read()
            .values()
            .find(|p| p.name == name && p.concept_id == concept_id)
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.inner.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_is_keyed_by_concept_and_remote_id() {
        let repo = RemoteProductRepository::default();
        assert_eq!(repo.upsert(1, 100, "Burger"), UpsertOutcome::Created);
        assert_eq!(repo.upsert(1, 100, "Burger XL"), UpsertOutcome::Updated);
        // Same remote id under a different concept is a separate mirror entry
        assert_eq!(repo.upsert(2, 100, "Burger"), UpsertOutcome::Created);
        assert_eq!(repo.count(), 2);

        let renamed = repo.find_by_name_and_concept("Burger XL", 1).unwrap();
        assert_eq!(renamed.remote_id, 100);
    }
}
