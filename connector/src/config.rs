//! Connector configuration
//!
//! All configuration items can be overridden through environment
//! variables:
//!
//! | Environment variable | Default | Description |
//! |----------------------|---------|-------------|
//! | HTTP_PORT | 3000 | HTTP service port |
//! | PHONE_COUNTRY_CODE | +965 | Prefix applied when normalizing phones |
//! | PHONE_NATIONAL_DIGITS | 8 | Trailing digits kept during normalization |
//! | FALLBACK_PHONE | 12345678 | Placeholder when an order has no phone |
//! | POS_SESSION_NAME | Call Center | POS configuration inbound orders attach to |
//! | DELIVERY_PRODUCT_NAME | Delivery Charge | Service product for delivery lines |
//! | ORDER_SOURCE | ERP | `source` tag on outbound order payloads |
//! | CATALOG_TIMEOUT_SECS | 60 | Timeout for catalog pulls |
//! | ORDER_TIMEOUT_SECS | 30 | Timeout for order pushes |
//! | STATUS_TIMEOUT_SECS | 10 | Timeout for status updates |
//! | PUSH_TIMEOUT_SECS | 15 | Timeout for the generic push helper |

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_string(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

/// Connector configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API service port
    pub http_port: u16,
    /// Country prefix for normalized phone numbers
    pub country_code: String,
    /// How many trailing digits form the national number
    pub national_digits: usize,
    /// Placeholder phone when an order carries none
    pub fallback_phone: String,
    /// POS configuration name whose opened session receives inbound orders
    pub pos_session_name: String,
    /// Name of the service product used for delivery charge lines
    pub delivery_product_name: String,
    /// `source` field stamped on outbound order payloads
    pub order_source: String,
    /// Timeout for `GET /products/` (seconds)
    pub catalog_timeout_secs: u64,
    /// Timeout for `POST /orders/` and `GET /orders` (seconds)
    pub order_timeout_secs: u64,
    /// Timeout for `PATCH /order_status/` (seconds)
    pub status_timeout_secs: u64,
    /// Timeout for the generic push helper (seconds)
    pub push_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            http_port: env_parse("HTTP_PORT", 3000),
            country_code: env_string("PHONE_COUNTRY_CODE", "+965"),
            national_digits: env_parse("PHONE_NATIONAL_DIGITS", 8),
            fallback_phone: env_string("FALLBACK_PHONE", "12345678"),
            pos_session_name: env_string("POS_SESSION_NAME", "Call Center"),
            delivery_product_name: env_string("DELIVERY_PRODUCT_NAME", "Delivery Charge"),
            order_source: env_string("ORDER_SOURCE", "ERP"),
            catalog_timeout_secs: env_parse("CATALOG_TIMEOUT_SECS", 60),
            order_timeout_secs: env_parse("ORDER_TIMEOUT_SECS", 30),
            status_timeout_secs: env_parse("STATUS_TIMEOUT_SECS", 10),
            push_timeout_secs: env_parse("PUSH_TIMEOUT_SECS", 15),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            country_code: "+965".into(),
            national_digits: 8,
            fallback_phone: "12345678".into(),
            pos_session_name: "Call Center".into(),
            delivery_product_name: "Delivery Charge".into(),
            order_source: "ERP".into(),
            catalog_timeout_secs: 60,
            order_timeout_secs: 30,
            status_timeout_secs: 10,
            push_timeout_secs: 15,
        }
    }
}
