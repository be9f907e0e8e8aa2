//! Inbound order ingest
//!
//! Turns an Ordable order (pulled back after a payment notification, or
//! delivered whole on the order-create webhook) into a local order. The
//! brand's mode decides the flavour: `pos` orders attach to the opened
//! call-center session and register POS payments, `sale` orders get a
//! posted invoice with an unreconciled payment.
//!
//! Ingest is idempotent: the order repository's unique remote key makes a
//! redelivered webhook resolve to the already-stored order instead of a
//! second copy.

mod customer;
mod pos;
mod sale;

pub use customer::{CustomerFlow, resolve_customer};

use shared::webhook::{InboundOrder, PaymentNotification};

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::store::models::{Brand, BrandMode};

/// Result of ingesting one inbound order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOutcome {
    pub order_id: i64,
    /// The remote key was already stored; `order_id` is the existing order
    pub already_exists: bool,
}

/// Build a local order from a full inbound order body
pub fn ingest_order(
    state: &AppState,
    brand: &Brand,
    inbound: &InboundOrder,
    flow: CustomerFlow,
) -> AppResult<IngestOutcome> {
    let customer = resolve_customer(state, inbound, flow);
    match brand.mode {
        BrandMode::Pos => pos::build_pos_order(state, brand, inbound, &customer),
        BrandMode::Sale => sale::build_sale_order(state, brand, inbound, &customer),
    }
}

/// Handle a payment notification: pull the full order back from the API,
/// then ingest it
pub async fn handle_payment_notification(
    state: &AppState,
    brand: &Brand,
    notification: &PaymentNotification,
) -> AppResult<IngestOutcome> {
    let envelope = state
        .client_for(brand)
        .fetch_orders(&notification.tracking_id)
        .await?;
    if !envelope.success {
        return Err(AppError::Internal(format!(
            "order pull for tracking {} reported failure",
            notification.tracking_id
        )));
    }
    let mut inbound = envelope.data.into_iter().next().ok_or_else(|| {
        AppError::NotFound(format!(
            "no order data for tracking {}",
            notification.tracking_id
        ))
    })?;
    // Payments delivered with the notification override the pulled ones
    if !notification.payments.is_empty() {
        inbound.payments = notification.payments.clone();
    }

    let outcome = ingest_order(state, brand, &inbound, CustomerFlow::PaymentPull)?;
    if outcome.already_exists {
        tracing::info!(
            tracking_id = %notification.tracking_id,
            order_id = outcome.order_id,
            "Order already ingested, payment notification ignored"
        );
    }
    Ok(outcome)
}
