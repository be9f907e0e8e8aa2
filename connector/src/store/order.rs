//! Local order repository (orders, lines, payments)
//!
//! The insert path enforces the idempotency key: a second order carrying
//! the same nonempty (remote_order_id, remote_tracking_id) pair is
//! rejected with [`RepoError::Duplicate`] inside a single write lock, so
//! concurrent webhook deliveries cannot both create the order.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::util::snowflake_id;

use super::models::{LocalOrder, OrderLine, OrderPaymentRecord, OrderState};
use super::{RepoError, RepoResult};

// Lines and payments are append-only and read back in insertion order,
// so they live in vectors rather than id maps.
#[derive(Default)]
struct OrderMaps {
    orders: HashMap<i64, LocalOrder>,
    lines: Vec<OrderLine>,
    payments: Vec<OrderPaymentRecord>,
}

#[derive(Clone, Default)]
pub struct OrderRepository {
    inner: Arc<RwLock<OrderMaps>>,
}

impl OrderRepository {
    /// Insert a new order, enforcing uniqueness of the remote key
    ///
    /// Orders without any remote identifier (locally created ones) are
    /// never considered duplicates of each other.
    pub fn insert(&self, mut order: LocalOrder) -> RepoResult<LocalOrder> {
        let mut maps = self.inner.write();
        let has_remote_key =
            order.remote_order_id.is_some() || order.remote_tracking_id.is_some();
        if has_remote_key
            && let Some(existing) = maps.orders.values().find(|o| {
                o.remote_order_id == order.remote_order_id
                    && o.remote_tracking_id == order.remote_tracking_id
            })
        {
            return Err(RepoError::Duplicate { existing: existing.id });
        }
        if order.id == 0 {
            order.id = snowflake_id();
        }
        maps.orders.insert(order.id, order.clone());
        Ok(order)
    }

    pub fn find_by_id(&self, id: i64) -> Option<LocalOrder> {
        self.inner.read().orders.get(&id).cloned()
    }

    /// Orders in `paid` state for a concept (manual push-all trigger)
    pub fn find_paid_by_concept(&self, concept_id: i64) -> Vec<LocalOrder> {
        let mut orders: Vec<LocalOrder> = self
            .inner
            .read()
            .orders
            .values()
            .filter(|o| o.concept_id == Some(concept_id) && o.state == OrderState::Paid)
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.created_at);
        orders
    }

    pub fn set_remote_order_id(&self, id: i64, remote_order_id: i64) -> RepoResult<()> {
        let mut maps = self.inner.write();
        let order = maps
            .orders
            .get_mut(&id)
            .ok_or_else(|| RepoError::NotFound(format!("order {id}")))?;
        order.remote_order_id = Some(remote_order_id);
        Ok(())
    }

    /// Write the stage field; returns whether it actually changed
    pub fn set_stage(&self, id: i64, stage_id: i64) -> RepoResult<bool> {
        let mut maps = self.inner.write();
        let order = maps
            .orders
            .get_mut(&id)
            .ok_or_else(|| RepoError::NotFound(format!("order {id}")))?;
        if order.stage_id == Some(stage_id) {
            return Ok(false);
        }
        order.stage_id = Some(stage_id);
        Ok(true)
    }

    /// Move an order to `paid`, recording the amount covered
    pub fn mark_paid(&self, id: i64, amount_paid: f64) -> RepoResult<()> {
        let mut maps = self.inner.write();
        let order = maps
            .orders
            .get_mut(&id)
            .ok_or_else(|| RepoError::NotFound(format!("order {id}")))?;
        order.state = OrderState::Paid;
        order.amount_paid = amount_paid;
        Ok(())
    }

    pub fn set_state(&self, id: i64, state: OrderState) -> RepoResult<()> {
        let mut maps = self.inner.write();
        let order = maps
            .orders
            .get_mut(&id)
            .ok_or_else(|| RepoError::NotFound(format!("order {id}")))?;
        order.state = state;
        Ok(())
    }

    pub fn add_line(&self, mut line: OrderLine) -> OrderLine {
        if line.id == 0 {
            line.id = snowflake_id();
        }
        self.inner.write().lines.push(line.clone());
        line
    }

    /// Lines of an order, in insertion order
    pub fn lines_for(&self, order_id: i64) -> Vec<OrderLine> {
        self.inner
            .read()
            .lines
            .iter()
            .filter(|l| l.order_id == order_id)
            .cloned()
            .collect()
    }

    pub fn add_payment(&self, mut payment: OrderPaymentRecord) -> OrderPaymentRecord {
        if payment.id == 0 {
            payment.id = snowflake_id();
        }
        self.inner.write().payments.push(payment.clone());
        payment
    }

    /// Payments of an order, in insertion order
    pub fn payments_for(&self, order_id: i64) -> Vec<OrderPaymentRecord> {
        self.inner
            .read()
            .payments
            .iter()
            .filter(|p| p.order_id == order_id)
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.inner.read().orders.len()
    }
}
