//! Shared HTTP-level test harness for store backends
//!
//! The macros in this module generate the same route tests for any store
//! implementing both `CompanyService` and `InvoiceService`: every test goes
//! JSON → HTTP request → handler → store → HTTP response → JSON.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod route_harness;
//! use route_harness::*;
//!
//! company_route_tests!(InMemoryStore::new());
//! invoice_route_tests!(InMemoryStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod company_tests;
#[macro_use]
pub mod invoice_tests;

use axum_test::TestServer;
use biztime::prelude::*;
use serde_json::Value;

/// Rows created by [`seed`]
pub struct Seeded {
    pub company: Company,
    pub invoice: Invoice,
}

/// Insert `ibm` with one unpaid invoice of 400, the fixture every route test starts from.
pub async fn seed<S>(store: &S) -> Seeded
where
    S: CompanyService + InvoiceService,
{
    let company = CompanyService::create(
        store,
        NewCompany {
            code: Some("ibm".to_string()),
            name: Some("IBM".to_string()),
            description: Some("Big blue.".to_string()),
        },
    )
    .await
    .expect("seed company");

    let invoice = InvoiceService::create(
        store,
        NewInvoice {
            comp_code: Some("ibm".to_string()),
            amt: Some(400.0),
        },
    )
    .await
    .expect("seed invoice");

    Seeded { company, invoice }
}

/// Build a test server over `store` after seeding it.
pub async fn seeded_server<S>(store: S) -> (TestServer, Seeded)
where
    S: CompanyService + InvoiceService + Clone + 'static,
{
    let seeded = seed(&store).await;
    let app = ServerBuilder::new()
        .with_store(store)
        .build()
        .expect("router should build");
    (TestServer::new(app), seeded)
}

/// Serialize a row the way the API renders it
pub fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).expect("serializable")
}

/// Today's date as the API renders it
pub fn today() -> String {
    chrono::Utc::now().date_naive().to_string()
}
