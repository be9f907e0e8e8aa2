//! Tax, journal, and invoice repositories (sale-order payment flow)

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::util::snowflake_id;

use super::models::{Invoice, InvoicePayment, Journal, JournalKind, Tax, TaxUse};
use super::{RepoError, RepoResult};

#[derive(Clone, Default)]
pub struct TaxRepository {
    inner: Arc<RwLock<HashMap<i64, Tax>>>,
}

impl TaxRepository {
    pub fn insert(&self, mut tax: Tax) -> Tax {
        if tax.id == 0 {
            tax.id = snowflake_id();
        }
        self.inner.write().insert(tax.id, tax.clone());
        tax
    }

    /// The zero-rate sale tax for a company, if configured
    pub fn find_zero_rate_sale(&self, company_id: i64) -> Option<Tax> {
        self.inner
            .read()
            .values()
            .find(|t| t.company_id == company_id && t.type_use == TaxUse::Sale && t.amount == 0.0)
            .cloned()
    }
}

#[derive(Clone, Default)]
pub struct JournalRepository {
    inner: Arc<RwLock<HashMap<i64, Journal>>>,
}

impl JournalRepository {
    pub fn insert(&self, mut journal: Journal) -> Journal {
        if journal.id == 0 {
            journal.id = snowflake_id();
        }
        self.inner.write().insert(journal.id, journal.clone());
        journal
    }

    /// First cash or bank journal for a company
    pub fn find_cash_or_bank(&self, company_id: i64) -> Option<Journal> {
        self.inner
            .read()
            .values()
            .find(|j| {
                j.company_id == company_id
                    && matches!(j.kind, JournalKind::Cash | JournalKind::Bank)
            })
            .cloned()
    }
}

// Payments are append-only and read back in insertion order.
#[derive(Default)]
struct InvoiceMaps {
    invoices: HashMap<i64, Invoice>,
    payments: Vec<InvoicePayment>,
}

#[derive(Clone, Default)]
pub struct InvoiceRepository {
    inner: Arc<RwLock<InvoiceMaps>>,
}

impl InvoiceRepository {
    pub fn insert(&self, mut invoice: Invoice) -> Invoice {
        if invoice.id == 0 {
            invoice.id = snowflake_id();
        }
        self.inner
            .write()
            .invoices
            .insert(invoice.id, invoice.clone());
        invoice
    }

    pub fn mark_posted(&self, id: i64) -> RepoResult<()> {
        let mut maps = self.inner.write();
        let invoice = maps
            .invoices
            .get_mut(&id)
            .ok_or_else(|| RepoError::NotFound(format!("invoice {id}")))?;
        invoice.posted = true;
        Ok(())
    }

    pub fn find_by_order(&self, order_id: i64) -> Option<Invoice> {
        self.inner
            .read()
            .invoices
            .values()
            .find(|i| i.order_id == order_id)
            .cloned()
    }

    pub fn add_payment(&self, mut payment: InvoicePayment) -> InvoicePayment {
        if payment.id == 0 {
            payment.id = snowflake_id();
        }
        self.inner.write().payments.push(payment.clone());
        payment
    }

    /// Payments against an invoice, in insertion order
    pub fn payments_for(&self, invoice_id: i64) -> Vec<InvoicePayment> {
        self.inner
            .read()
            .payments
            .iter()
            .filter(|p| p.invoice_id == invoice_id)
            .cloned()
            .collect()
    }
}
