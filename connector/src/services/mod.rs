//! Connector services

pub mod ingest;
pub mod money;
pub mod order_push;
pub mod phone;
pub mod product_sync;
pub mod status_sync;
