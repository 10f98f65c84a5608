//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::host::ServerHost;
use super::router::{finalize, health_routes};
use crate::core::{CompanyService, InvoiceService};
use crate::entities::{CompanyDescriptor, InvoiceDescriptor};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the BizTime HTTP application
///
/// # Example
///
/// ```ignore
/// let store = InMemoryStore::new();
/// let app = ServerBuilder::new()
///     .with_company_service(store.clone())
///     .with_invoice_service(store)
///     .build()?;
/// ```
#[derive(Default)]
pub struct ServerBuilder {
    companies: Option<Arc<dyn CompanyService>>,
    invoices: Option<Arc<dyn InvoiceService>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the company store (required)
    pub fn with_company_service(mut self, service: impl CompanyService + 'static) -> Self {
        self.companies = Some(Arc::new(service));
        self
    }

    /// Set the invoice store (required)
    pub fn with_invoice_service(mut self, service: impl InvoiceService + 'static) -> Self {
        self.invoices = Some(Arc::new(service));
        self
    }

    /// Use one store for both companies and invoices
    pub fn with_store<S>(self, store: S) -> Self
    where
        S: CompanyService + InvoiceService + Clone + 'static,
    {
        self.with_company_service(store.clone())
            .with_invoice_service(store)
    }

    /// Add routes that are not part of a resource
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the shared handler state
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let companies = self.companies.take().ok_or_else(|| {
            anyhow::anyhow!("CompanyService is required. Call .with_company_service()")
        })?;
        let invoices = self.invoices.take().ok_or_else(|| {
            anyhow::anyhow!("InvoiceService is required. Call .with_invoice_service()")
        })?;
        Ok(ServerHost::new(companies, invoices))
    }

    /// Build the final router
    ///
    /// This generates:
    /// - CRUD routes for companies and invoices
    /// - Health routes
    /// - The not-found fallback for unknown paths and methods
    pub fn build(mut self) -> Result<Router> {
        let host = self.build_host()?;

        let mut registry = EntityRegistry::new();
        registry.register(Box::new(CompanyDescriptor::new(host.clone())));
        registry.register(Box::new(InvoiceDescriptor::new(host)));
        tracing::debug!(resources = ?registry.plurals(), "registered resources");

        let mut app = health_routes().merge(registry.build_routes());
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(finalize(app))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
