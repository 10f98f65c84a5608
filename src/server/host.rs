//! Shared state handed to every handler
//!
//! `ServerHost` is cheap to clone: it only holds the two store handles.
//! There is no other process-wide state; the connection pool lives behind
//! the stores.

use crate::core::{CompanyService, InvoiceService};
use std::sync::Arc;

/// Store handles shared by all routes
#[derive(Clone)]
pub struct ServerHost {
    /// Company storage
    pub companies: Arc<dyn CompanyService>,

    /// Invoice storage
    pub invoices: Arc<dyn InvoiceService>,
}

impl ServerHost {
    pub fn new(companies: Arc<dyn CompanyService>, invoices: Arc<dyn InvoiceService>) -> Self {
        Self {
            companies,
            invoices,
        }
    }
}
