//! Record store models
//!
//! Typed field structs for every entity the connector touches in the host
//! platform. The host's own persistence is out of scope; these are the
//! explicit shapes the repositories operate on.

use serde::{Deserialize, Serialize};
use shared::RemoteStatus;

/// Which local order flavour a brand produces from inbound webhooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandMode {
    Pos,
    Sale,
}

/// One configured remote tenant (store/branch) with its own credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    /// Raw token sent as the `Authorization` header (no "Bearer " prefix)
    pub api_token: String,
    pub base_url: String,
    /// Branch identifier matched against the webhook `brand` query param
    pub branch_id: String,
    pub concept_id: i64,
    pub sync_enabled: bool,
    pub mode: BrandMode,
    pub company_id: i64,
}

/// Grouping tag linking brands, products, and orders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concept {
    pub id: i64,
    pub name: String,
}

/// Local mirror of one Ordable catalog entry, unique per (concept, remote_id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteProduct {
    pub id: i64,
    pub name: String,
    pub concept_id: i64,
    pub remote_id: i64,
}

/// Ordered workflow state of a local order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStage {
    pub id: i64,
    pub name: String,
    pub sequence: i32,
    pub active: bool,
}

/// Stage → remote status mapping; at most one active mapping per stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMapping {
    pub id: i64,
    pub stage_id: i64,
    pub remote_status: RemoteStatus,
    pub sequence: i32,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Local product record; inbound items find-or-create these
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub list_price: f64,
    pub concept_ids: Vec<i64>,
    /// Service products (delivery charge) are not physical goods
    pub is_service: bool,
    pub tax_ids: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    Pos,
    Sale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Draft,
    Confirmed,
    Paid,
}

/// Local order, POS or sale variant
///
/// (remote_order_id, remote_tracking_id) is the idempotency key; the
/// repository rejects a second insert carrying the same nonempty pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalOrder {
    pub id: i64,
    pub kind: OrderKind,
    pub customer_id: i64,
    pub company_id: i64,
    pub session_id: Option<i64>,
    pub concept_id: Option<i64>,
    pub remote_order_id: Option<i64>,
    pub remote_tracking_id: Option<String>,
    pub stage_id: Option<i64>,
    pub state: OrderState,
    #[serde(default)]
    pub note: String,
    pub client_ref: Option<String>,
    pub amount_total: f64,
    pub amount_paid: f64,
    pub amount_tax: f64,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub display_name: String,
    pub qty: f64,
    pub price_unit: f64,
    pub subtotal: f64,
    pub tax_ids: Vec<i64>,
}

/// One registered payment against a POS order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPaymentRecord {
    pub id: i64,
    pub order_id: i64,
    pub method_id: i64,
    pub amount: f64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Opened,
    Closed,
}

/// POS session; inbound POS orders attach to the opened session of the
/// configured call-center configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosSession {
    pub id: i64,
    pub config_name: String,
    pub company_id: i64,
    pub state: SessionState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxUse {
    Sale,
    Purchase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tax {
    pub id: i64,
    pub company_id: i64,
    pub amount: f64,
    pub type_use: TaxUse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalKind {
    Cash,
    Bank,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    pub id: i64,
    pub company_id: i64,
    pub kind: JournalKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub order_id: i64,
    pub company_id: i64,
    pub customer_id: i64,
    pub amount_total: f64,
    pub posted: bool,
}

/// Payment registered against a posted invoice (sale flow); invoice and
/// payment lines are deliberately not reconciled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoicePayment {
    pub id: i64,
    pub invoice_id: i64,
    pub journal_id: i64,
    pub customer_id: i64,
    pub amount: f64,
    pub reference: String,
    pub posted: bool,
}
