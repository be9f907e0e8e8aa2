//! Wire types for the Ordable remote API
//!
//! Everything the connector sends to or parses from Ordable lives here:
//! the catalog/order pull envelope, the outbound order payload, and the
//! order-status update body.

use serde::{Deserialize, Serialize};

/// Response envelope used by the Ordable pull endpoints:
/// `{ "success": bool, "data": [ ... ] }`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// One entry of the remote product catalog (`GET /products/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
}

/// Order payload for `POST /orders/`
///
/// Field casing follows the Ordable API verbatim, including the odd
/// PascalCase `IsAsap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub branch_id: String,
    pub status: String,
    /// `%Y-%m-%dT%H:%M`, minute precision
    pub expected_time: String,
    pub source: String,
    pub order_type: String,
    pub delivery_rate: f64,
    #[serde(rename = "IsAsap")]
    pub is_asap: bool,
    pub payment_complete: bool,
    pub payment_method: String,
    pub customer: PayloadCustomer,
    pub delivery_address: PayloadAddress,
    pub items: Vec<PayloadItem>,
    pub discounts: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadCustomer {
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadAddress {
    pub area: String,
    pub street: String,
}

/// One order line, referencing the Ordable product id from the mirror
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadItem {
    pub id: i64,
    pub price: f64,
    pub quantity: f64,
    pub options: Vec<PayloadItem>,
}

/// Remote order status vocabulary (`PATCH /order_status/`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteStatus {
    New,
    Received,
    #[serde(rename = "Out For Delivery")]
    OutForDelivery,
    Complete,
    Cancelled,
}

impl RemoteStatus {
    /// Wire string as sent to Ordable
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Received => "Received",
            Self::OutForDelivery => "Out For Delivery",
            Self::Complete => "Complete",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which identifier the status update references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceBy {
    OrderId,
    TrackingId,
}

/// Body for `PATCH /order_status/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub order_id: String,
    pub reference_by: ReferenceBy,
    pub status: RemoteStatus,
}
