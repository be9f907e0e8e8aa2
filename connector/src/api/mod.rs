//! API routes for the connector

pub mod health;
pub mod sync;
pub mod webhook;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Ordable-facing webhooks (the host platform fronts these)
    let webhooks = Router::new()
        .route("/ordable/payment", get(webhook::handle_payment))
        .route("/ordable/order/create", post(webhook::handle_order_create));

    // Manual triggers
    let triggers = Router::new()
        .route("/ordable/sync_products", get(sync::sync_products))
        .route("/ordable/sync_options", get(sync::sync_options))
        .route("/ordable/sync_orders", get(sync::sync_orders));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(webhooks)
        .merge(triggers)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
