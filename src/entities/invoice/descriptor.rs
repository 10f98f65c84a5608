//! Entity descriptor for Invoice

use super::{create_invoice, delete_invoice, get_invoice, list_invoices, update_invoice};
use crate::server::{EntityDescriptor, ServerHost};
use axum::{Router, routing::get};

/// Descriptor for the Invoice entity
pub struct InvoiceDescriptor {
    pub host: ServerHost,
}

impl InvoiceDescriptor {
    pub fn new(host: ServerHost) -> Self {
        Self { host }
    }
}

impl EntityDescriptor for InvoiceDescriptor {
    fn plural(&self) -> &str {
        "invoices"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/invoices", get(list_invoices).post(create_invoice))
            .route(
                "/invoices/{id}",
                get(get_invoice).patch(update_invoice).delete(delete_invoice),
            )
            .with_state(self.host.clone())
    }
}
