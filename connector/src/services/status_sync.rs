//! Stage → remote status propagation
//!
//! When a local order moves to a stage that carries an active status
//! mapping, the mapped status is PATCHed to Ordable. Every missing
//! precondition is a silent (logged) skip; a failed PATCH never rolls
//! back the local stage change.

use shared::ordable::{ReferenceBy, StatusUpdate};

use crate::client::ClientError;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::store::models::LocalOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationResult {
    /// PATCH sent and accepted
    Sent,
    /// A precondition failed; nothing was sent
    Skipped,
    /// PATCH attempted and failed; local stage keeps its new value
    Failed,
}

/// Move an order to a stage and propagate the mapped status
///
/// Writing the same stage twice is a no-op and sends nothing.
pub async fn set_order_stage(
    state: &AppState,
    order_id: i64,
    stage_id: i64,
) -> AppResult<PropagationResult> {
    state
        .store
        .stages
        .find_by_id(stage_id)
        .ok_or_else(|| AppError::NotFound(format!("stage {stage_id}")))?;

    let changed = state.store.orders.set_stage(order_id, stage_id)?;
    if !changed {
        return Ok(PropagationResult::Skipped);
    }
    let order = state
        .store
        .orders
        .find_by_id(order_id)
        .ok_or_else(|| AppError::NotFound(format!("order {order_id}")))?;
    Ok(propagate_stage_change(state, &order).await)
}

/// Push the remote status mapped to the order's current stage
///
/// Preconditions, checked in order: the order is a remote one (carries a
/// remote order id or tracking id), it has a stage, the stage has an
/// active mapping, the order's concept has a brand, the brand has sync
/// enabled, and the brand has an API token. Any miss skips the push.
pub async fn propagate_stage_change(state: &AppState, order: &LocalOrder) -> PropagationResult {
    let reference = match (order.remote_order_id, order.remote_tracking_id.as_deref()) {
        (Some(remote_id), _) => (remote_id.to_string(), ReferenceBy::OrderId),
        (None, Some(tracking)) if !tracking.is_empty() => {
            (tracking.to_string(), ReferenceBy::TrackingId)
        }
        _ => {
            tracing::debug!(order_id = order.id, "Not a remote order, no status to push");
            return PropagationResult::Skipped;
        }
    };
    let Some(stage_id) = order.stage_id else {
        tracing::debug!(order_id = order.id, "Order has no stage");
        return PropagationResult::Skipped;
    };
    let Some(mapping) = state.store.mappings.find_active_by_stage(stage_id) else {
        tracing::debug!(order_id = order.id, stage_id, "No active status mapping for stage");
        return PropagationResult::Skipped;
    };
    let Some(brand) = order
        .concept_id
        .and_then(|c| state.store.brands.find_by_concept(c))
    else {
        tracing::info!(order_id = order.id, "No brand for order concept, skipping status push");
        return PropagationResult::Skipped;
    };
    if !brand.sync_enabled {
        tracing::info!(brand = %brand.name, "Sync disabled, skipping status push");
        return PropagationResult::Skipped;
    }
    if brand.api_token.is_empty() || brand.base_url.is_empty() {
        tracing::info!(brand = %brand.name, "Brand missing API credentials, skipping status push");
        return PropagationResult::Skipped;
    }

    let (order_ref, reference_by) = reference;
    let update = StatusUpdate {
        order_id: order_ref,
        reference_by,
        status: mapping.remote_status,
    };
    match state.client_for(&brand).update_status(&update).await {
        Ok(()) => {
            tracing::info!(
                order_id = order.id,
                status = %mapping.remote_status,
                brand = %brand.name,
                "Order status updated"
            );
            PropagationResult::Sent
        }
        Err(ClientError::Timeout) => {
            tracing::error!(order_id = order.id, brand = %brand.name, "Status update timed out");
            PropagationResult::Failed
        }
        Err(ClientError::Connect(e)) => {
            tracing::error!(order_id = order.id, brand = %brand.name, error = %e, "Could not reach Ordable for status update");
            PropagationResult::Failed
        }
        Err(e) => {
            tracing::error!(order_id = order.id, brand = %brand.name, error = %e, "Status update failed");
            PropagationResult::Failed
        }
    }
}
