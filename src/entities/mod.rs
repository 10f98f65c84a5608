//! Resources exposed by the API
//!
//! Each resource contributes an [`EntityDescriptor`](crate::server::EntityDescriptor)
//! that builds its own routes.

pub mod company;
pub mod invoice;

pub use company::CompanyDescriptor;
pub use invoice::InvoiceDescriptor;
