//! OrdableClient — HTTP client for one brand's Ordable tenant
//!
//! Thin wrapper over a shared `reqwest::Client` carrying the brand's base
//! URL and raw API token. The token goes into the `Authorization` header
//! as-is (the Ordable API does not use a "Bearer " prefix).

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use shared::ordable::{ApiEnvelope, CatalogEntry, OrderPayload, StatusUpdate};
use shared::webhook::InboundOrder;

use crate::config::Config;

/// Transport/remote error taxonomy
///
/// Timeouts and connection failures are kept distinct from generic
/// request errors so callers can log them distinctly.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Connect(e.to_string())
        } else {
            ClientError::Request(e.to_string())
        }
    }
}

/// Per-endpoint-class request timeouts
#[derive(Debug, Clone, Copy)]
pub struct ClientTimeouts {
    pub catalog: Duration,
    pub order: Duration,
    pub status: Duration,
    pub push: Duration,
}

impl From<&Config> for ClientTimeouts {
    fn from(config: &Config) -> Self {
        Self {
            catalog: Duration::from_secs(config.catalog_timeout_secs),
            order: Duration::from_secs(config.order_timeout_secs),
            status: Duration::from_secs(config.status_timeout_secs),
            push: Duration::from_secs(config.push_timeout_secs),
        }
    }
}

/// Result of the generic push helper
///
/// A successful push without an id in the response is a warning outcome,
/// not an error; the caller decides what to do with the missing id.
#[derive(Debug, Clone)]
pub struct PushOutcome {
    pub id: Option<i64>,
    pub response: Value,
}

/// HTTP client bound to one brand's credentials
pub struct OrdableClient {
    http: Client,
    base_url: String,
    token: String,
    timeouts: ClientTimeouts,
}

impl OrdableClient {
    pub fn new(
        http: Client,
        base_url: &str,
        token: impl Into<String>,
        timeouts: ClientTimeouts,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            timeouts,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/",
            self.base_url,
            endpoint.trim_matches('/')
        )
    }

    /// Pull the remote product catalog (`GET {base}/products/`)
    ///
    /// The caller checks the envelope's application-level `success` flag.
    pub async fn fetch_products(&self) -> Result<ApiEnvelope<CatalogEntry>, ClientError> {
        let url = self.url("products");
        let response = self
            .http
            .get(&url)
            .header("Authorization", &self.token)
            .timeout(self.timeouts.catalog)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|_| ClientError::InvalidJson(body))
    }

    /// Pull full order data for a tracking id (`GET {base}/orders?tracking_id=`)
    pub async fn fetch_orders(
        &self,
        tracking_id: &str,
    ) -> Result<ApiEnvelope<InboundOrder>, ClientError> {
        let url = format!("{}/orders", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("tracking_id", tracking_id)])
            .header("Authorization", &self.token)
            .timeout(self.timeouts.order)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|_| ClientError::InvalidJson(body))
    }

    /// Push one order (`POST {base}/orders/`)
    ///
    /// Returns the remote order id when the response body carries one
    /// under `data.id`; 200 and 201 both count as success.
    pub async fn push_order(&self, payload: &OrderPayload) -> Result<Option<i64>, ClientError> {
        let url = self.url("orders");
        let response = self
            .http
            .post(&url)
            .header("Authorization", &self.token)
            .timeout(self.timeouts.order)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !matches!(status, StatusCode::OK | StatusCode::CREATED) {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // A success body without a usable id is tolerated; the caller
        // logs it and leaves the order eligible for a later push.
        let body = response.text().await.unwrap_or_default();
        let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
        Ok(extract_data_id(&parsed))
    }

    /// Push an order status change (`PATCH {base}/order_status/`)
    pub async fn update_status(&self, update: &StatusUpdate) -> Result<(), ClientError> {
        let url = self.url("order_status");
        let response = self
            .http
            .patch(&url)
            .header("Authorization", &self.token)
            .header("Accept", "application/json")
            .timeout(self.timeouts.status)
            .json(update)
            .send()
            .await?;

        let status = response.status();
        if !matches!(status, StatusCode::OK | StatusCode::CREATED) {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Generic push against `{base}/{endpoint}/`
    ///
    /// Used for category-like pushes where the endpoint varies. DELETE
    /// sends no body. Success responses are expected to carry the created
    /// or updated record id under `data.id` or `data[0].id`; a missing id
    /// is surfaced as `PushOutcome { id: None, .. }` after a warning.
    pub async fn push(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<PushOutcome, ClientError> {
        let url = self.url(endpoint);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("Authorization", &self.token)
            .timeout(self.timeouts.push);
        if method != Method::DELETE
            && let Some(body) = body
        {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !matches!(status, StatusCode::OK | StatusCode::CREATED) {
            tracing::warn!(%url, status = status.as_u16(), body = %text, "Ordable push failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(%url, body = %text, "Non-JSON response from Ordable");
                return Err(ClientError::InvalidJson(text));
            }
        };

        let id = extract_data_id(&parsed);
        if id.is_none() {
            tracing::warn!(%url, "Success response but missing 'id' field");
        }
        Ok(PushOutcome {
            id,
            response: parsed,
        })
    }
}

/// Extract the record id from `{data: {id}}` or `{data: [{id}, ...]}`
fn extract_data_id(value: &Value) -> Option<i64> {
    match value.get("data") {
        Some(Value::Object(obj)) => obj.get("id").and_then(Value::as_i64),
        Some(Value::Array(arr)) => arr.first().and_then(|v| v.get("id")).and_then(Value::as_i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn data_id_extraction_handles_both_response_formats() {
        assert_eq!(extract_data_id(&json!({"data": {"id": 7}})), Some(7));
        assert_eq!(
            extract_data_id(&json!({"data": [{"id": 8}, {"id": 9}]})),
            Some(8)
        );
        assert_eq!(extract_data_id(&json!({"data": []})), None);
        assert_eq!(extract_data_id(&json!({"data": "ok"})), None);
        assert_eq!(extract_data_id(&json!({})), None);
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = OrdableClient::new(
            Client::new(),
            "https://api.example.com/v1/",
            "tok",
            ClientTimeouts::from(&Config::default()),
        );
        assert_eq!(client.url("products"), "https://api.example.com/v1/products/");
        assert_eq!(
            client.url("/order_status/"),
            "https://api.example.com/v1/order_status/"
        );
    }
}
