//! Brand and Concept repositories

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::util::snowflake_id;

use super::models::{Brand, Concept};

#[derive(Clone, Default)]
pub struct BrandRepository {
    inner: Arc<RwLock<HashMap<i64, Brand>>>,
}

impl BrandRepository {
    pub fn insert(&self, mut brand: Brand) -> Brand {
        if brand.id == 0 {
            brand.id = snowflake_id();
        }
        self.inner.write().insert(brand.id, brand.clone());
        brand
    }

    pub fn find_by_id(&self, id: i64) -> Option<Brand> {
        self.inner.read().get(&id).cloned()
    }

    /// Resolve the brand a webhook addresses via its `brand` query param
    pub fn find_by_branch(&self, branch_id: &str) -> Option<Brand> {
        self.inner
            .read()
            .values()
            .find(|b| b.branch_id == branch_id)
            .cloned()
    }

    /// First brand configured for a concept, regardless of sync flag
    pub fn find_by_concept(&self, concept_id: i64) -> Option<Brand> {
        self.inner
            .read()
            .values()
            .find(|b| b.concept_id == concept_id)
            .cloned()
    }

    /// First sync-enabled brand for a concept (status propagation guard)
    pub fn find_sync_enabled_by_concept(&self, concept_id: i64) -> Option<Brand> {
        self.inner
            .read()
            .values()
            .find(|b| b.concept_id == concept_id && b.sync_enabled)
            .cloned()
    }

    /// All brands with sync enabled (catalog sync, paid-order push)
    pub fn find_sync_enabled(&self) -> Vec<Brand> {
        let mut brands: Vec<Brand> = self
            .inner
            .read()
            .values()
            .filter(|b| b.sync_enabled)
            .cloned()
            .collect();
        brands.sort_by_key(|b| b.id);
        brands
    }
}

#[derive(Clone, Default)]
pub struct ConceptRepository {
    inner: Arc<RwLock<HashMap<i64, Concept>>>,
}

impl ConceptRepository {
    pub fn insert(&self, mut concept: Concept) -> Concept {
        if concept.id == 0 {
            concept.id = snowflake_id();
        }
        self.inner.write().insert(concept.id, concept.clone());
        concept
    }

    pub fn find_by_id(&self, id: i64) -> Option<Concept> {
        self.inner.read().get(&id).cloned()
    }
}
