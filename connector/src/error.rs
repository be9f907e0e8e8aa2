//! Connector error types

use crate::client::ClientError;
use crate::store::RepoError;
use thiserror::Error;

/// Service-layer error
///
/// Webhook handlers flatten these into `{status: "error", message}`
/// responses; nothing here ever reaches a caller as a raw 5xx.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Remote(#[from] ClientError),

    #[error(transparent)]
    Store(#[from] RepoError),

    #[error("{0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;
