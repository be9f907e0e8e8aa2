//! Local product repository

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::util::snowflake_id;

use super::models::Product;

#[derive(Clone, Default)]
pub struct ProductRepository {
    inner: Arc<RwLock<HashMap<i64, Product>>>,
}

impl ProductRepository {
    pub fn insert(&self, mut product: Product) -> Product {
        if product.id == 0 {
            product.id = snowflake_id();
        }
        self.inner.write().insert(product.id, product.clone());
        product
    }

    pub fn find_by_id(&self, id: i64) -> Option<Product> {
        self.inner.read().get(&id).cloned()
    }

    /// Exact-name lookup without concept filter (sale-order flow)
    pub fn find_by_name(&self, name: &str) -> Option<Product> {
        self.inner.read().values().find(|p| p.name == name).cloned()
    }

    /// Exact-name lookup restricted to products linked to a concept
    /// (POS flow)
    pub fn find_by_name_in_concept(&self, name: &str, concept_id: i64) -> Option<Product> {
        self.inner
            .read()
            .values()
            .find(|p| p.name == name && p.concept_ids.contains(&concept_id))
            .cloned()
    }

    /// Service-product lookup (delivery charge)
    pub fn find_service_by_name(&self, name: &str) -> Option<Product> {
        self.inner
            .read()
            .values()
            .find(|p| p.name == name && p.is_service)
            .cloned()
    }
}
