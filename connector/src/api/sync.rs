//! Manual sync triggers

use axum::Json;
use axum::extract::State;
use shared::webhook::WebhookResponse;

use crate::services::{order_push, product_sync};
use crate::state::AppState;

/// `GET /ordable/sync_products` — pull catalogs for all enabled brands
pub async fn sync_products(State(state): State<AppState>) -> Json<WebhookResponse> {
    let report = product_sync::sync_products(&state).await;
    if report.brands_failed > 0 {
        return Json(WebhookResponse::error(format!(
            "{} of {} brands failed ({} created, {} updated)",
            report.brands_failed, report.brands_total, report.created, report.updated
        )));
    }
    Json(WebhookResponse::success(format!(
        "{} brands synced ({} created, {} updated)",
        report.brands_total, report.created, report.updated
    )))
}

/// `GET /ordable/sync_options` — runs the same catalog sync as
/// `sync_products`; kept as a separate route for trigger compatibility
pub async fn sync_options(state: State<AppState>) -> Json<WebhookResponse> {
    sync_products(state).await
}

/// `GET /ordable/sync_orders` — push all paid orders of enabled brands
pub async fn sync_orders(State(state): State<AppState>) -> Json<WebhookResponse> {
    match order_push::push_paid_orders(&state).await {
        Ok(pushed) => Json(WebhookResponse::success(format!("{pushed} orders pushed"))),
        Err(e) => {
            tracing::error!(error = %e, "Manual order push failed");
            Json(WebhookResponse::error(e.to_string()))
        }
    }
}
