//! Typed record store
//!
//! In-memory stand-in for the host platform's persistence, exposed as one
//! repository per entity with explicit field structs. Each repository owns
//! its own `Arc<RwLock<HashMap>>`; cloning a repository (or the whole
//! [`RecordStore`]) shares the underlying maps.

pub mod models;

mod accounting;
mod brand;
mod customer;
mod order;
mod pos;
mod product;
mod remote_product;
mod stage;

pub use accounting::{InvoiceRepository, JournalRepository, TaxRepository};
pub use brand::{BrandRepository, ConceptRepository};
pub use customer::CustomerRepository;
pub use order::OrderRepository;
pub use pos::{PaymentMethodRepository, PosSessionRepository};
pub use product::ProductRepository;
pub use remote_product::{RemoteProductRepository, UpsertOutcome};
pub use stage::{OrderStageRepository, StatusMappingRepository};

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique-constraint conflict; carries the id of the record that
    /// already holds the key
    #[error("Duplicate: existing record {existing}")]
    Duplicate { existing: i64 },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// All repositories bundled into one cloneable handle
#[derive(Clone, Default)]
pub struct RecordStore {
    pub brands: BrandRepository,
    pub concepts: ConceptRepository,
    pub remote_products: RemoteProductRepository,
    pub products: ProductRepository,
    pub customers: CustomerRepository,
    pub orders: OrderRepository,
    pub stages: OrderStageRepository,
    pub mappings: StatusMappingRepository,
    pub sessions: PosSessionRepository,
    pub payment_methods: PaymentMethodRepository,
    pub taxes: TaxRepository,
    pub journals: JournalRepository,
    pub invoices: InvoiceRepository,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}
