//! POS session and payment method repositories

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::util::snowflake_id;

use super::models::{PaymentMethod, PosSession, SessionState};

#[derive(Clone, Default)]
pub struct PosSessionRepository {
    inner: Arc<RwLock<HashMap<i64, PosSession>>>,
}

impl PosSessionRepository {
    pub fn insert(&self, mut session: PosSession) -> PosSession {
        if session.id == 0 {
            session.id = snowflake_id();
        }
        self.inner.write().insert(session.id, session.clone());
        session
    }

    /// The opened session for a named POS configuration, if any
    pub fn find_opened_by_config(&self, config_name: &str) -> Option<PosSession> {
        self.inner
            .read()
            .values()
            .find(|s| s.state == SessionState::Opened && s.config_name == config_name)
            .cloned()
    }
}

#[derive(Clone, Default)]
pub struct PaymentMethodRepository {
    inner: Arc<RwLock<HashMap<i64, PaymentMethod>>>,
}

impl PaymentMethodRepository {
    pub fn insert(&self, mut method: PaymentMethod) -> PaymentMethod {
        if method.id == 0 {
            method.id = snowflake_id();
        }
        self.inner.write().insert(method.id, method.clone());
        method
    }

    /// Fuzzy lookup: case-insensitive substring match, mirroring the
    /// `ilike` search the webhook payload names are matched with
    pub fn find_fuzzy(&self, name: &str) -> Option<PaymentMethod> {
        let needle = name.to_lowercase();
        self.inner
            .read()
            .values()
            .find(|m| m.name.to_lowercase().contains(&needle))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuzzy_method_lookup_ignores_case_and_partial_names() {
        let repo = PaymentMethodRepository::default();
        repo.insert(PaymentMethod {
            id: 0,
            name: "KNET Online".into(),
        });
        assert!(repo.find_fuzzy("knet").is_some());
        assert!(repo.find_fuzzy("Knet Online").is_some());
        assert!(repo.find_fuzzy("visa").is_none());
    }
}
