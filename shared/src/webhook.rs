//! Inbound webhook payload types
//!
//! Ordable delivers two notification shapes: a payment notification (the
//! connector then pulls the full order data back from the API) and a full
//! order payload on `/ordable/order/create`. Fields are tolerant of
//! omission — webhook senders are not under our control.

use serde::{Deserialize, Serialize};

fn default_qty() -> f64 {
    1.0
}

/// Full order as delivered by the order-create webhook or pulled back via
/// `GET /orders?tracking_id=`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundOrder {
    pub id: i64,
    pub tracking_id: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub special_remarks: String,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub is_delivery: bool,
    #[serde(default)]
    pub delivery_rate: f64,
    #[serde(default)]
    pub payment_complete: bool,
    #[serde(default)]
    pub items: Vec<InboundItem>,
    #[serde(default)]
    pub payments: Vec<InboundPayment>,
}

/// One ordered item; options recurse with the same shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundItem {
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_qty")]
    pub quantity: f64,
    #[serde(default)]
    pub options: Vec<InboundItem>,
}

/// One payment entry; method and amount are optional on the wire and
/// entries missing either are skipped during ingest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundPayment {
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub payment_reference: String,
}

/// Payment notification body (`GET /ordable/payment`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentNotification {
    pub tracking_id: String,
    #[serde(default)]
    pub payments: Vec<InboundPayment>,
}

/// Uniform webhook response: `{status, message}`
///
/// Internal failures are reported with HTTP 200 and `status: "error"` so
/// that webhook callers do not retry-storm on our internal problems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub status: String,
    pub message: String,
}

impl WebhookResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_item_defaults_quantity_to_one() {
        let item: InboundItem =
            serde_json::from_str(r#"{"name": "Burger", "price": 1.5}"#).unwrap();
        assert_eq!(item.quantity, 1.0);
        assert!(item.options.is_empty());
    }

    #[test]
    fn payment_entry_tolerates_null_amount() {
        let p: InboundPayment =
            serde_json::from_str(r#"{"payment_method": "knet", "amount": null}"#).unwrap();
        assert_eq!(p.payment_method.as_deref(), Some("knet"));
        assert!(p.amount.is_none());
    }

    #[test]
    fn inbound_order_parses_minimal_body() {
        let order: InboundOrder =
            serde_json::from_str(r#"{"id": 7, "tracking_id": "TRK-7"}"#).unwrap();
        assert_eq!(order.id, 7);
        assert!(!order.payment_complete);
        assert!(order.items.is_empty());
    }
}
