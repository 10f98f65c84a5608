//! Core module containing the domain types, store traits and error handling

pub mod entity;
pub mod error;
pub mod extractors;
pub mod service;

pub use entity::{
    Company, CompanyChanges, CompanyWithInvoices, Invoice, InvoiceChanges, InvoiceWithCompany,
    NewCompany, NewInvoice,
};
pub use error::{
    BizError, BizResult, EntityError, ErrorBody, ErrorEnvelope, RequestError, StorageError,
    StorageResult,
};
pub use extractors::{JsonBody, PathParam};
pub use service::{CompanyService, InvoiceService};
