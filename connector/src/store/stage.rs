//! Order stage and status mapping repositories

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::util::snowflake_id;

use super::models::{OrderStage, StatusMapping};
use super::{RepoError, RepoResult};

#[derive(Clone, Default)]
pub struct OrderStageRepository {
    inner: Arc<RwLock<HashMap<i64, OrderStage>>>,
}

impl OrderStageRepository {
    /// Insert a stage; stage names are unique
    pub fn insert(&self, mut stage: OrderStage) -> RepoResult<OrderStage> {
        let mut map = self.inner.write();
        if let Some(existing) = map.values().find(|s| s.name == stage.name) {
            return Err(RepoError::Duplicate { existing: existing.id });
        }
        if stage.id == 0 {
            stage.id = snowflake_id();
        }
        map.insert(stage.id, stage.clone());
        Ok(stage)
    }

    pub fn find_by_id(&self, id: i64) -> Option<OrderStage> {
        self.inner.read().get(&id).cloned()
    }

    pub fn find_by_name(&self, name: &str) -> Option<OrderStage> {
        self.inner.read().values().find(|s| s.name == name).cloned()
    }
}

#[derive(Clone, Default)]
pub struct StatusMappingRepository {
    inner: Arc<RwLock<HashMap<i64, StatusMapping>>>,
}

impl StatusMappingRepository {
    /// Insert a mapping; at most one active mapping may exist per stage
    pub fn insert(&self, mut mapping: StatusMapping) -> RepoResult<StatusMapping> {
        let mut map = self.inner.write();
        if mapping.active
            && let Some(existing) = map
                .values()
                .find(|m| m.stage_id == mapping.stage_id && m.active)
        {
            return Err(RepoError::Duplicate { existing: existing.id });
        }
        if mapping.id == 0 {
            mapping.id = snowflake_id();
        }
        map.insert(mapping.id, mapping.clone());
        Ok(mapping)
    }

    /// The active mapping for a stage, if any
    pub fn find_active_by_stage(&self, stage_id: i64) -> Option<StatusMapping> {
        self.inner
            .read()
            .values()
            .find(|m| m.stage_id == stage_id && m.active)
            .cloned()
    }
}
