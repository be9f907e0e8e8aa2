//! Customer repository

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::util::snowflake_id;

use super::models::Customer;

#[derive(Clone, Default)]
pub struct CustomerRepository {
    inner: Arc<RwLock<HashMap<i64, Customer>>>,
}

impl CustomerRepository {
    pub fn insert(&self, mut customer: Customer) -> Customer {
        if customer.id == 0 {
            customer.id = snowflake_id();
        }
        self.inner.write().insert(customer.id, customer.clone());
        customer
    }

    pub fn find_by_id(&self, id: i64) -> Option<Customer> {
        self.inner.read().get(&id).cloned()
    }

    pub fn find_by_phone(&self, phone: &str) -> Option<Customer> {
        self.inner
            .read()
            .values()
            .find(|c| c.phone == phone)
            .cloned()
    }

    /// Match against any of the given phone spellings (raw and
    /// country-prefix-stripped variants)
    pub fn find_by_any_phone(&self, phones: &[&str]) -> Option<Customer> {
        self.inner
            .read()
            .values()
            .find(|c| phones.iter().any(|p| !p.is_empty() && c.phone == *p))
            .cloned()
    }
}
