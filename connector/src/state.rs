//! Application state

use std::sync::Arc;

use crate::client::{ClientTimeouts, OrdableClient};
use crate::config::Config;
use crate::store::RecordStore;
use crate::store::models::Brand;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Typed record store standing in for the host platform's persistence
    pub store: RecordStore,
    /// Shared connection pool for all outbound Ordable calls
    http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            store: RecordStore::new(),
            http: reqwest::Client::new(),
        }
    }

    /// Ordable client bound to one brand's credentials
    pub fn client_for(&self, brand: &Brand) -> OrdableClient {
        OrdableClient::new(
            self.http.clone(),
            &brand.base_url,
            brand.api_token.clone(),
            ClientTimeouts::from(self.config.as_ref()),
        )
    }
}
