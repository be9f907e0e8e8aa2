//! Inbound Ordable webhooks
//!
//! Both handlers answer HTTP 200 with `{status, message}` regardless of
//! internal outcome, so Ordable does not retry-storm on our internal
//! failures. The one exception is brand resolution: a webhook addressing
//! an unknown brand is a caller mistake and gets a 400.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use shared::webhook::{InboundOrder, PaymentNotification, WebhookResponse};

use crate::services::ingest::{self, CustomerFlow};
use crate::state::AppState;
use crate::store::models::Brand;

#[derive(Debug, Deserialize)]
pub struct BrandQuery {
    /// Branch identifier of the brand the webhook addresses
    pub brand: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentQuery {
    pub brand: String,
    pub tracking_id: String,
}

fn resolve_brand(
    state: &AppState,
    branch_id: &str,
) -> Result<Brand, (StatusCode, Json<WebhookResponse>)> {
    state.store.brands.find_by_branch(branch_id).ok_or_else(|| {
        tracing::warn!(brand = %branch_id, "Webhook for unknown brand");
        (
            StatusCode::BAD_REQUEST,
            Json(WebhookResponse::error(format!("unknown brand '{branch_id}'"))),
        )
    })
}

/// `GET /ordable/payment?brand=&tracking_id=`
///
/// The body, when present, is the payment notification itself; its
/// payment entries take precedence over whatever the order pull returns.
/// A missing or unparseable body falls back to the pulled order's own
/// payments.
pub async fn handle_payment(
    State(state): State<AppState>,
    Query(query): Query<PaymentQuery>,
    body: Bytes,
) -> (StatusCode, Json<WebhookResponse>) {
    let brand = match resolve_brand(&state, &query.brand) {
        Ok(brand) => brand,
        Err(response) => return response,
    };
    let payments = if body.is_empty() {
        vec![]
    } else {
        match serde_json::from_slice::<PaymentNotification>(&body) {
            Ok(notification) => notification.payments,
            Err(e) => {
                tracing::warn!(tracking_id = %query.tracking_id, error = %e, "Unparseable payment notification body");
                vec![]
            }
        }
    };
    let notification = PaymentNotification {
        tracking_id: query.tracking_id.clone(),
        payments,
    };

    match ingest::handle_payment_notification(&state, &brand, &notification).await {
        Ok(outcome) if outcome.already_exists => (
            StatusCode::OK,
            Json(WebhookResponse::success(format!(
                "order for tracking {} already exists",
                query.tracking_id
            ))),
        ),
        Ok(outcome) => (
            StatusCode::OK,
            Json(WebhookResponse::success(format!(
                "order {} created",
                outcome.order_id
            ))),
        ),
        Err(e) => {
            tracing::error!(tracking_id = %query.tracking_id, error = %e, "Payment webhook failed");
            (StatusCode::OK, Json(WebhookResponse::error(e.to_string())))
        }
    }
}

/// `POST /ordable/order/create?brand=`
pub async fn handle_order_create(
    State(state): State<AppState>,
    Query(query): Query<BrandQuery>,
    Json(inbound): Json<InboundOrder>,
) -> (StatusCode, Json<WebhookResponse>) {
    let brand = match resolve_brand(&state, &query.brand) {
        Ok(brand) => brand,
        Err(response) => return response,
    };

    match ingest::ingest_order(&state, &brand, &inbound, CustomerFlow::OrderCreate) {
        Ok(outcome) if outcome.already_exists => (
            StatusCode::OK,
            Json(WebhookResponse::success(format!(
                "order for tracking {} already exists",
                inbound.tracking_id
            ))),
        ),
        Ok(outcome) => (
            StatusCode::OK,
            Json(WebhookResponse::success(format!(
                "order {} created",
                outcome.order_id
            ))),
        ),
        Err(e) => {
            tracing::error!(tracking_id = %inbound.tracking_id, error = %e, "Order-create webhook failed");
            (StatusCode::OK, Json(WebhookResponse::error(e.to_string())))
        }
    }
}
