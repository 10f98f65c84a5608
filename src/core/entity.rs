//! Rows of the `companies` and `invoices` tables and the payloads that write them

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A row of the `companies` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// A row of the `invoices` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}

/// A company annotated with all of its invoices.
///
/// Built per request from two sequential reads and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyWithInvoices {
    #[serde(flatten)]
    pub company: Company,
    pub invoices: Vec<Invoice>,
}

/// An invoice annotated with the company it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceWithCompany {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub company: Company,
}

impl InvoiceWithCompany {
    pub fn new(invoice: Invoice, company: Company) -> Self {
        Self {
            id: invoice.id,
            amt: invoice.amt,
            paid: invoice.paid,
            add_date: invoice.add_date,
            paid_date: invoice.paid_date,
            company,
        }
    }
}

/// Body of `POST /companies`.
///
/// A missing field reaches the store as NULL and is rejected there by the
/// NOT NULL constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCompany {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Body of `PATCH /companies/{code}`. Both columns are overwritten.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Body of `POST /invoices`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewInvoice {
    pub comp_code: Option<String>,
    pub amt: Option<f64>,
}

/// Body of `PATCH /invoices/{id}`.
///
/// `amt` is overwritten; `paid` is left untouched when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceChanges {
    pub amt: Option<f64>,
    pub paid: Option<bool>,
}

/// Resolve the `paid_date` column after a change to `paid`.
///
/// Paying an unpaid invoice stamps `today`, paying a paid one keeps its date,
/// un-paying clears it, and no change to `paid` keeps everything as is.
pub fn next_paid_date(
    was_paid: bool,
    current: Option<NaiveDate>,
    paid: Option<bool>,
    today: NaiveDate,
) -> Option<NaiveDate> {
    match paid {
        None => current,
        Some(true) if was_paid => current,
        Some(true) => Some(today),
        Some(false) => None,
    }
}
