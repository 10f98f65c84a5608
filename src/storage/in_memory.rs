//! In-memory implementation of the company and invoice services
//!
//! Useful for testing and development. It enforces the same constraints as
//! the relational schema (primary key, unique name, NOT NULL, foreign key,
//! `amt > 0`, cascade on delete) and reports violations with the wording
//! PostgreSQL uses, so handlers behave identically on both backends.

use crate::core::entity::next_paid_date;
use crate::core::{
    Company, CompanyChanges, CompanyService, Invoice, InvoiceChanges, InvoiceService, NewCompany,
    NewInvoice, StorageError, StorageResult,
};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

const BACKEND: &str = "in-memory";

#[derive(Debug, Default)]
struct Tables {
    /// Kept in insertion order, like an unordered heap scan
    companies: Vec<Company>,
    invoices: BTreeMap<i32, Invoice>,
    next_invoice_id: i32,
}

/// In-memory store implementing both [`CompanyService`] and [`InvoiceService`]
///
/// Clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|e| StorageError::Connection {
            backend: BACKEND,
            message: format!("Failed to acquire read lock: {}", e),
        })
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|e| StorageError::Connection {
            backend: BACKEND,
            message: format!("Failed to acquire write lock: {}", e),
        })
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn not_null(column: &str, relation: &str) -> StorageError {
    StorageError::NotNullViolation {
        message: format!(
            "null value in column \"{}\" of relation \"{}\" violates not-null constraint",
            column, relation
        ),
    }
}

fn unique(constraint: &str) -> StorageError {
    StorageError::UniqueViolation {
        message: format!(
            "duplicate key value violates unique constraint \"{}\"",
            constraint
        ),
    }
}

fn missing_company() -> StorageError {
    StorageError::ForeignKeyViolation {
        message: "insert or update on table \"invoices\" violates foreign key constraint \"invoices_comp_code_fkey\"".to_string(),
    }
}

fn check_amount(amt: f64) -> StorageResult<f64> {
    if amt > 0.0 {
        Ok(amt)
    } else {
        Err(StorageError::CheckViolation {
            message: "new row for relation \"invoices\" violates check constraint \"invoices_amt_check\"".to_string(),
        })
    }
}

impl Tables {
    fn company_exists(&self, code: &str) -> bool {
        self.companies.iter().any(|c| c.code == code)
    }

    fn name_taken(&self, name: &str, except_code: Option<&str>) -> bool {
        self.companies
            .iter()
            .any(|c| c.name == name && Some(c.code.as_str()) != except_code)
    }
}

#[async_trait]
impl CompanyService for InMemoryStore {
    async fn list(&self) -> StorageResult<Vec<Company>> {
        Ok(self.read()?.companies.clone())
    }

    async fn get(&self, code: &str) -> StorageResult<Option<Company>> {
        Ok(self
            .read()?
            .companies
            .iter()
            .find(|c| c.code == code)
            .cloned())
    }

    async fn create(&self, company: NewCompany) -> StorageResult<Company> {
        let mut tables = self.write()?;

        let code = company.code.ok_or_else(|| not_null("code", "companies"))?;
        let name = company.name.ok_or_else(|| not_null("name", "companies"))?;
        if tables.company_exists(&code) {
            return Err(unique("companies_pkey"));
        }
        if tables.name_taken(&name, None) {
            return Err(unique("companies_name_key"));
        }

        let row = Company {
            code,
            name,
            description: company.description,
        };
        tables.companies.push(row.clone());
        Ok(row)
    }

    async fn update(&self, code: &str, changes: CompanyChanges) -> StorageResult<Option<Company>> {
        let mut tables = self.write()?;

        if !tables.company_exists(code) {
            return Ok(None);
        }
        let name = changes.name.ok_or_else(|| not_null("name", "companies"))?;
        if tables.name_taken(&name, Some(code)) {
            return Err(unique("companies_name_key"));
        }

        let Some(row) = tables.companies.iter_mut().find(|c| c.code == code) else {
            return Ok(None);
        };
        row.name = name;
        row.description = changes.description;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, code: &str) -> StorageResult<u64> {
        let mut tables = self.write()?;

        let before = tables.companies.len();
        tables.companies.retain(|c| c.code != code);
        let removed = (before - tables.companies.len()) as u64;

        if removed > 0 {
            tables.invoices.retain(|_, inv| inv.comp_code != code);
        }
        Ok(removed)
    }
}

#[async_trait]
impl InvoiceService for InMemoryStore {
    async fn list(&self) -> StorageResult<Vec<Invoice>> {
        Ok(self.read()?.invoices.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> StorageResult<Option<Invoice>> {
        Ok(self.read()?.invoices.get(&id).cloned())
    }

    async fn list_for_company(&self, code: &str) -> StorageResult<Vec<Invoice>> {
        Ok(self
            .read()?
            .invoices
            .values()
            .filter(|inv| inv.comp_code == code)
            .cloned()
            .collect())
    }

    async fn create(&self, invoice: NewInvoice) -> StorageResult<Invoice> {
        let mut tables = self.write()?;

        let comp_code = invoice
            .comp_code
            .ok_or_else(|| not_null("comp_code", "invoices"))?;
        let amt = invoice.amt.ok_or_else(|| not_null("amt", "invoices"))?;
        let amt = check_amount(amt)?;
        if !tables.company_exists(&comp_code) {
            return Err(missing_company());
        }

        tables.next_invoice_id += 1;
        let row = Invoice {
            id: tables.next_invoice_id,
            comp_code,
            amt,
            paid: false,
            add_date: today(),
            paid_date: None,
        };
        tables.invoices.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, changes: InvoiceChanges) -> StorageResult<Option<Invoice>> {
        let mut tables = self.write()?;

        let Some(row) = tables.invoices.get_mut(&id) else {
            return Ok(None);
        };
        let amt = changes.amt.ok_or_else(|| not_null("amt", "invoices"))?;
        row.amt = check_amount(amt)?;
        row.paid_date = next_paid_date(row.paid, row.paid_date, changes.paid, today());
        if let Some(paid) = changes.paid {
            row.paid = paid;
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> StorageResult<u64> {
        Ok(self.write()?.invoices.remove(&id).map_or(0, |_| 1))
    }
}
