//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresStore`, which implements [`CompanyService`] and
//! [`InvoiceService`] on top of a shared `sqlx::PgPool`. Every operation is a
//! single parameterized statement; connections are checked out of the pool
//! per statement and returned when it completes.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! biztime = { version = "0.1", features = ["postgres"] }
//! ```

use crate::config::DatabaseConfig;
use crate::core::{
    Company, CompanyChanges, CompanyService, Invoice, InvoiceChanges, InvoiceService, NewCompany,
    NewInvoice, StorageError, StorageResult,
};
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::{info, instrument, warn};

// ---------------------------------------------------------------------------
// Pool and schema management
// ---------------------------------------------------------------------------

/// Open a connection pool, retrying with exponential backoff.
#[instrument(skip(url, config))]
pub async fn connect(url: &str, config: &DatabaseConfig) -> StorageResult<PgPool> {
    let mut retries = config.connect_retries;
    let mut delay = Duration::from_millis(500);

    loop {
        match PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(url)
            .await
        {
            Ok(pool) => {
                info!("PostgreSQL connection pool established");
                return Ok(pool);
            }
            Err(e) if retries > 0 => {
                retries -= 1;
                warn!(
                    error = %e,
                    retries_left = retries,
                    delay_ms = delay.as_millis() as u64,
                    "PostgreSQL connection failed, retrying"
                );
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(Duration::from_secs(10));
            }
            Err(e) => {
                return Err(StorageError::Connection {
                    backend: "PostgreSQL",
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Create the `companies` and `invoices` tables if they do not exist.
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> StorageResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS companies (
            code text PRIMARY KEY,
            name text NOT NULL UNIQUE,
            description text
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS invoices (
            id serial PRIMARY KEY,
            comp_code text NOT NULL REFERENCES companies ON DELETE CASCADE,
            amt float NOT NULL,
            paid boolean DEFAULT false NOT NULL,
            add_date date DEFAULT CURRENT_DATE NOT NULL,
            paid_date date,
            CONSTRAINT invoices_amt_check CHECK (amt > (0)::double precision)
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// PostgresStore
// ---------------------------------------------------------------------------

const INVOICE_COLUMNS: &str = "id, comp_code, amt, paid, add_date, paid_date";

/// Company and invoice storage backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// let pool = biztime::storage::postgres::connect(&url, &config.database).await?;
/// let store = PostgresStore::new(pool);
/// let companies = CompanyService::list(&store).await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyService for PostgresStore {
    #[instrument(skip(self))]
    async fn list(&self) -> StorageResult<Vec<Company>> {
        let rows = sqlx::query_as::<_, Company>("SELECT code, name, description FROM companies")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn get(&self, code: &str) -> StorageResult<Option<Company>> {
        let row = sqlx::query_as::<_, Company>(
            "SELECT code, name, description FROM companies WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    #[instrument(skip(self, company))]
    async fn create(&self, company: NewCompany) -> StorageResult<Company> {
        let row = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (code, name, description)
             VALUES ($1, $2, $3)
             RETURNING code, name, description",
        )
        .bind(company.code)
        .bind(company.name)
        .bind(company.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, code: &str, changes: CompanyChanges) -> StorageResult<Option<Company>> {
        let row = sqlx::query_as::<_, Company>(
            "UPDATE companies
             SET name = $1, description = $2
             WHERE code = $3
             RETURNING code, name, description",
        )
        .bind(changes.name)
        .bind(changes.description)
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    #[instrument(skip(self))]
    async fn delete(&self, code: &str) -> StorageResult<u64> {
        let result = sqlx::query("DELETE FROM companies WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl InvoiceService for PostgresStore {
    #[instrument(skip(self))]
    async fn list(&self) -> StorageResult<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i32) -> StorageResult<Option<Invoice>> {
        let row = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    #[instrument(skip(self))]
    async fn list_for_company(&self, code: &str) -> StorageResult<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE comp_code = $1 ORDER BY id"
        ))
        .bind(code)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    #[instrument(skip(self, invoice))]
    async fn create(&self, invoice: NewInvoice) -> StorageResult<Invoice> {
        let row = sqlx::query_as::<_, Invoice>(&format!(
            "INSERT INTO invoices (comp_code, amt)
             VALUES ($1, $2)
             RETURNING {INVOICE_COLUMNS}"
        ))
        .bind(invoice.comp_code)
        .bind(invoice.amt)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: i32, changes: InvoiceChanges) -> StorageResult<Option<Invoice>> {
        // SET expressions see the row as it was before the update.
        let row = sqlx::query_as::<_, Invoice>(&format!(
            "UPDATE invoices
             SET amt = $1,
                 paid = COALESCE($2::boolean, paid),
                 paid_date = CASE
                     WHEN $2::boolean IS NULL THEN paid_date
                     WHEN $2::boolean AND paid THEN paid_date
                     WHEN $2::boolean THEN CURRENT_DATE
                     ELSE NULL
                 END
             WHERE id = $3
             RETURNING {INVOICE_COLUMNS}"
        ))
        .bind(changes.amt)
        .bind(changes.paid)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> StorageResult<u64> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
