//! Outbound HTTP client for the Ordable API

mod ordable;

pub use ordable::{ClientError, ClientTimeouts, OrdableClient, PushOutcome};
