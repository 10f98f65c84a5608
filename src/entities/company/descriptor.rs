//! Entity descriptor for Company

use super::{create_company, delete_company, get_company, list_companies, update_company};
use crate::server::{EntityDescriptor, ServerHost};
use axum::{Router, routing::get};

/// Descriptor for the Company entity
pub struct CompanyDescriptor {
    pub host: ServerHost,
}

impl CompanyDescriptor {
    pub fn new(host: ServerHost) -> Self {
        Self { host }
    }
}

impl EntityDescriptor for CompanyDescriptor {
    fn plural(&self) -> &str {
        "companies"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/companies", get(list_companies).post(create_company))
            .route(
                "/companies/{code}",
                get(get_company).patch(update_company).delete(delete_company),
            )
            .with_state(self.host.clone())
    }
}
