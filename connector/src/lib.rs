//! ordable-connector — integration bridge between the host POS/ERP
//! platform and the Ordable order-management API
//!
//! Outbound: per-brand product catalog pulls into a local mirror, paid
//! order pushes, and stage-to-status propagation. Inbound: payment and
//! order-create webhooks that build local POS or sale orders
//! idempotently.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod store;
