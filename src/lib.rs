//! # BizTime
//!
//! A small REST API over companies and the invoices they issue.
//!
//! ## Routes
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/companies` | 200 `{companies:[...]}` |
//! | GET | `/companies/{code}` | 200 `{company:{..., invoices:[...]}}` |
//! | POST | `/companies` | 201 `{company:{...}}` |
//! | PATCH | `/companies/{code}` | 201 `{company:{...}}` |
//! | DELETE | `/companies/{code}` | 200 `{msg:"<code> DELETED!"}` |
//! | GET | `/invoices` | 200 `{invoices:[...]}` |
//! | GET | `/invoices/{id}` | 200 `{invoice:{..., company:{...}}}` |
//! | POST | `/invoices` | 201 `{invoice:{...}}` |
//! | PATCH | `/invoices/{id}` | 201 `{invoice:{...}}` |
//! | DELETE | `/invoices/{id}` | 200 `{msg:"<id> DELETED!"}` |
//!
//! Every failure, including unmatched routes, is answered with
//! `{"error":{"message":...,"status":...}}`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use biztime::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_store(InMemoryStore::new())
//!     .build()?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod observability;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        BizError, BizResult, Company, CompanyChanges, CompanyService, CompanyWithInvoices,
        EntityError, ErrorEnvelope, Invoice, InvoiceChanges, InvoiceService, InvoiceWithCompany,
        JsonBody, NewCompany, NewInvoice, PathParam, RequestError, StorageError,
        StorageResult,
    };

    // === Storage ===
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresStore;

    // === Config ===
    pub use crate::config::{AppConfig, Environment};

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
