//! ServerBuilder for fluent API to build the HTTP server

use super::handlers::AppState;
use super::router::{build_customer_routes, health_routes};
use crate::config::AppConfig;
use crate::core::CustomerStore;
use crate::service::{CustomerRequest, CustomerService};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the customer HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryCustomerStore::new())
///     .with_config(&config)
///     .build()
///     .await?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn CustomerStore>>,
    seed: Vec<CustomerRequest>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            seed: Vec::new(),
        }
    }

    /// Set the customer store (required)
    pub fn with_store(mut self, store: impl CustomerStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Take the seed customers from a loaded configuration
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.seed.extend(config.seed.iter().cloned());
        self
    }

    /// Customers created through the service before the router is returned
    pub fn with_seed(mut self, seed: impl IntoIterator<Item = CustomerRequest>) -> Self {
        self.seed.extend(seed);
        self
    }

    /// Build the service and apply the seed
    ///
    /// Seed entries go through the same validation as POST requests; the
    /// first invalid entry aborts the build.
    pub async fn build_service(&mut self) -> Result<CustomerService> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("CustomerStore is required. Call .with_store()"))?;
        let service = CustomerService::new(store);

        let seed = std::mem::take(&mut self.seed);
        let count = seed.len();
        for (index, request) in seed.into_iter().enumerate() {
            service
                .create(request)
                .await
                .with_context(|| format!("invalid seed customer at index {}", index))?;
        }
        if count > 0 {
            tracing::info!(count, "seed customers loaded");
        }

        Ok(service)
    }

    /// Build the final REST router
    ///
    /// This generates:
    /// - Health routes
    /// - Customer CRUD and query routes
    ///
    /// Every route is wrapped in request tracing and a permissive CORS layer.
    pub async fn build(mut self) -> Result<Router> {
        let service = self.build_service().await?;
        let state = AppState::new(service);

        let app = health_routes().merge(build_customer_routes(state));

        Ok(app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_store(InMemoryCustomerStore::new())
    ///     .serve("127.0.0.1:8080").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build().await?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

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
