//! Service traits for company and invoice storage
//!
//! Handlers only ever talk to the store through these traits. Each method
//! maps to a single statement against the store; nothing here spans a
//! transaction.

use crate::core::entity::{Company, CompanyChanges, Invoice, InvoiceChanges, NewCompany, NewInvoice};
use crate::core::error::StorageResult;
use async_trait::async_trait;

/// Storage operations on the `companies` table
#[async_trait]
pub trait CompanyService: Send + Sync {
    /// List every company
    async fn list(&self) -> StorageResult<Vec<Company>>;

    /// Get a company by code
    async fn get(&self, code: &str) -> StorageResult<Option<Company>>;

    /// Insert a company and return the stored row
    async fn create(&self, company: NewCompany) -> StorageResult<Company>;

    /// Overwrite name and description.
    ///
    /// Returns `None` when no row has this code.
    async fn update(&self, code: &str, changes: CompanyChanges) -> StorageResult<Option<Company>>;

    /// Delete a company (its invoices cascade) and return the number of rows removed
    async fn delete(&self, code: &str) -> StorageResult<u64>;
}

/// Storage operations on the `invoices` table
#[async_trait]
pub trait InvoiceService: Send + Sync {
    /// List every invoice
    async fn list(&self) -> StorageResult<Vec<Invoice>>;

    /// Get an invoice by id
    async fn get(&self, id: i32) -> StorageResult<Option<Invoice>>;

    /// List the invoices whose `comp_code` is `code`
    async fn list_for_company(&self, code: &str) -> StorageResult<Vec<Invoice>>;

    /// Insert an invoice and return the stored row
    async fn create(&self, invoice: NewInvoice) -> StorageResult<Invoice>;

    /// Apply changes to an invoice.
    ///
    /// Returns `None` when no row has this id.
    async fn update(&self, id: i32, changes: InvoiceChanges) -> StorageResult<Option<Invoice>>;

    /// Delete an invoice and return the number of rows removed
    async fn delete(&self, id: i32) -> StorageResult<u64>;
}
