//! Shared types for the Ordable connector
//!
//! Wire types crossing the two HTTP boundaries (outbound Ordable API calls
//! and inbound webhook payloads), plus small utilities used by every crate.

pub mod ordable;
pub mod util;
pub mod webhook;

// Re-exports
pub use ordable::{
    ApiEnvelope, CatalogEntry, OrderPayload, ReferenceBy, RemoteStatus, StatusUpdate,
};
pub use webhook::{
    InboundItem, InboundOrder, InboundPayment, PaymentNotification, WebhookResponse,
};
