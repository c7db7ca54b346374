//! High-level query service for reporting views.
//!
//! Provides the boundary-callable operations: every call waits on the latency simulator,
//! reads through the injected repository, runs the [`QueryEngine`], and converts any
//! internal failure into an opaque [`DataFetchError`].

use crate::config::ServiceConfig;
use crate::engine::QueryEngine;
use crate::entity::{Customer, Invoice, Revenue};
use crate::error::{DataFetchError, FetchResult, Result};
use crate::format::CurrencyFormatter;
use crate::latency::LatencySimulator;
use crate::observability::{NoOpMetrics, QueryMetrics};
use crate::operation::Operation;
use crate::repository::DataRepository;
use crate::rows::{
    CardData, CustomerField, CustomerSummaryRow, InvoiceForm, InvoiceRow, LatestInvoice, Overview,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

struct ServiceInner<R> {
    repository: R,
    engine: QueryEngine,
    latency: LatencySimulator,
    metrics: Box<dyn QueryMetrics>,
    config: ServiceConfig,
}

/// Query service for the dashboard views.
///
/// Cheap to clone: clones share one repository, engine and metrics sink through an `Arc`.
/// No operation mutates shared state, so concurrent calls never contend.
///
/// # Example
///
/// ```
/// use dashboard_kit::{DashboardService, InMemoryRepository, ServiceConfig};
/// use dashboard_kit::latency::LatencyPolicy;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ServiceConfig::default().with_latency(LatencyPolicy::Disabled);
/// let service = DashboardService::with_config(InMemoryRepository::placeholder(), config)?;
///
/// let cards = service.fetch_card_data().await?;
/// assert_eq!(cards.number_of_customers, 6);
///
/// let page = service.fetch_filtered_invoices("paid", 1).await?;
/// assert!(page.len() <= 6);
/// # Ok(())
/// # }
/// ```
pub struct DashboardService<R: DataRepository> {
    inner: Arc<ServiceInner<R>>,
}

impl<R: DataRepository> Clone for DashboardService<R> {
    fn clone(&self) -> Self {
        DashboardService {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: DataRepository> DashboardService<R> {
    /// Create a service with the default configuration (uniform latency up to 5 s).
    pub fn new(repository: R) -> Self {
        DashboardServiceBuilder::new(repository).build_unchecked()
    }

    /// Create a service with a custom configuration.
    ///
    /// # Errors
    /// Returns `Error::ConfigError` if the configuration is invalid.
    pub fn with_config(repository: R, config: ServiceConfig) -> Result<Self> {
        DashboardServiceBuilder::new(repository)
            .with_config(config)
            .build()
    }

    /// Start a builder for full control over formatter and metrics.
    pub fn builder(repository: R) -> DashboardServiceBuilder<R> {
        DashboardServiceBuilder::new(repository)
    }

    pub fn repository(&self) -> &R {
        &self.inner.repository
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.inner.config
    }

    /// Get a reference to the underlying engine.
    pub fn engine(&self) -> &QueryEngine {
        &self.inner.engine
    }

    /// The full revenue series, unchanged.
    ///
    /// # Errors
    /// `"Failed to fetch revenue data."`
    pub async fn fetch_revenue(&self) -> FetchResult<Vec<Revenue>> {
        self.run(Operation::Revenue, async {
            Ok(self.inner.repository.revenue().await?.to_vec())
        })
        .await
    }

    /// The most recent invoices (5 by default), newest first, with customer details.
    ///
    /// # Errors
    /// `"Failed to fetch the latest invoices."`
    pub async fn fetch_latest_invoices(&self) -> FetchResult<Vec<LatestInvoice>> {
        self.run(Operation::LatestInvoices, async {
            let (customers, invoices) = self.tables().await?;
            self.inner.engine.latest_invoices(&customers, &invoices)
        })
        .await
    }

    /// Customer and invoice counts plus paid and pending totals.
    ///
    /// # Errors
    /// `"Failed to fetch card data."`
    pub async fn fetch_card_data(&self) -> FetchResult<CardData> {
        self.run(Operation::CardData, async {
            let (customers, invoices) = self.tables().await?;
            Ok(self.inner.engine.card_data(&customers, &invoices))
        })
        .await
    }

    /// One page of invoices matching `query`. Pages are 1-based.
    ///
    /// # Errors
    /// `"Failed to fetch invoices."`
    pub async fn fetch_filtered_invoices(
        &self,
        query: &str,
        current_page: usize,
    ) -> FetchResult<Vec<InvoiceRow>> {
        self.run(Operation::FilteredInvoices, async {
            let (customers, invoices) = self.tables().await?;
            self.inner
                .engine
                .filtered_invoices(&customers, &invoices, query, current_page)
        })
        .await
    }

    /// Number of pages `fetch_filtered_invoices` spans for `query`.
    ///
    /// # Errors
    /// `"Failed to fetch total number of invoices."`
    pub async fn fetch_invoices_pages(&self, query: &str) -> FetchResult<usize> {
        self.run(Operation::InvoicesPages, async {
            let (customers, invoices) = self.tables().await?;
            self.inner.engine.invoice_pages(&customers, &invoices, query)
        })
        .await
    }

    /// One invoice prepared for editing, or `None` if no invoice has that id.
    ///
    /// # Errors
    /// `"Failed to fetch invoice."`
    pub async fn fetch_invoice_by_id(&self, id: &str) -> FetchResult<Option<InvoiceForm>> {
        self.run(Operation::InvoiceById, async {
            let invoice = self.inner.repository.find_invoice(id).await?;
            Ok(invoice.as_ref().map(InvoiceForm::from))
        })
        .await
    }

    /// Every customer as `{id, name}`, ordered by name.
    ///
    /// # Errors
    /// `"Failed to fetch all customers."`
    pub async fn fetch_customers(&self) -> FetchResult<Vec<CustomerField>> {
        self.run(Operation::Customers, async {
            let customers = self.inner.repository.customers().await?;
            Ok(self.inner.engine.customer_fields(&customers))
        })
        .await
    }

    /// Customers matching `query`, each with invoice count and status totals.
    ///
    /// # Errors
    /// `"Failed to fetch customer table."`
    pub async fn fetch_filtered_customers(
        &self,
        query: &str,
    ) -> FetchResult<Vec<CustomerSummaryRow>> {
        self.run(Operation::FilteredCustomers, async {
            let (customers, invoices) = self.tables().await?;
            Ok(self
                .inner
                .engine
                .filtered_customers(&customers, &invoices, query))
        })
        .await
    }

    /// Revenue, latest invoices and cards, fetched concurrently.
    ///
    /// Each part runs as its own operation with its own latency. If any part fails,
    /// the whole overview fails.
    ///
    /// # Errors
    /// `"Failed to fetch dashboard overview."`
    pub async fn fetch_overview(&self) -> FetchResult<Overview> {
        let timer = Instant::now();

        let parts = futures::try_join!(
            self.fetch_revenue(),
            self.fetch_latest_invoices(),
            self.fetch_card_data()
        );

        match parts {
            Ok((revenue, latest_invoices, cards)) => {
                self.inner
                    .metrics
                    .record_success(Operation::Overview, timer.elapsed());
                Ok(Overview {
                    revenue,
                    latest_invoices,
                    cards,
                })
            }
            Err(part) => {
                let cause = format!("{} failed", part.operation());
                error!("Database Error: {}: {}", Operation::Overview, cause);
                self.inner
                    .metrics
                    .record_failure(Operation::Overview, &cause);
                Err(DataFetchError::new(Operation::Overview))
            }
        }
    }

    /// Read customers and invoices together.
    async fn tables(&self) -> Result<(Arc<[Customer]>, Arc<[Invoice]>)> {
        let repository = &self.inner.repository;
        futures::try_join!(repository.customers(), repository.invoices())
    }

    /// Operation boundary: latency, timing, logging, and error replacement.
    async fn run<T, F>(&self, operation: Operation, read: F) -> FetchResult<T>
    where
        F: Future<Output = Result<T>>,
    {
        let timer = Instant::now();
        debug!("» {}", operation);

        let (delay, outcome) = self.inner.latency.simulate(operation, read).await;
        self.inner.metrics.record_latency(operation, delay);

        match outcome {
            Ok(value) => {
                self.inner.metrics.record_success(operation, timer.elapsed());
                debug!("✓ {} completed in {:?}", operation, timer.elapsed());
                Ok(value)
            }
            Err(e) => {
                error!("Database Error: {}: {}", operation, e);
                self.inner.metrics.record_failure(operation, &e.to_string());
                Err(DataFetchError::new(operation))
            }
        }
    }
}

/// Builder for [`DashboardService`].
///
/// ```
/// use dashboard_kit::{DashboardService, InMemoryRepository, ServiceConfig};
/// use dashboard_kit::format::UsdFormatter;
/// use dashboard_kit::latency::LatencyPolicy;
/// use dashboard_kit::observability::LogMetrics;
///
/// let service = DashboardService::builder(InMemoryRepository::empty())
///     .with_config(ServiceConfig::default().with_latency(LatencyPolicy::Disabled))
///     .with_formatter(Box::new(UsdFormatter))
///     .with_metrics(Box::new(LogMetrics))
///     .build()
///     .unwrap();
///
/// assert_eq!(service.config().items_per_page, 6);
/// ```
pub struct DashboardServiceBuilder<R: DataRepository> {
    repository: R,
    config: ServiceConfig,
    formatter: Option<Box<dyn CurrencyFormatter>>,
    metrics: Box<dyn QueryMetrics>,
}

impl<R: DataRepository> DashboardServiceBuilder<R> {
    pub fn new(repository: R) -> Self {
        DashboardServiceBuilder {
            repository,
            config: ServiceConfig::default(),
            formatter: None,
            metrics: Box::new(NoOpMetrics),
        }
    }

    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Set a custom currency formatter.
    pub fn with_formatter(mut self, formatter: Box<dyn CurrencyFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Set custom metrics handler.
    pub fn with_metrics(mut self, metrics: Box<dyn QueryMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Validate the configuration and build the service.
    ///
    /// # Errors
    /// Returns `Error::ConfigError` if the configuration is invalid.
    pub fn build(self) -> Result<DashboardService<R>> {
        self.config.validate()?;
        Ok(self.build_unchecked())
    }

    fn build_unchecked(self) -> DashboardService<R> {
        let mut engine = QueryEngine::new(&self.config);
        if let Some(formatter) = self.formatter {
            engine = engine.with_formatter(formatter);
        }

        DashboardService {
            inner: Arc::new(ServiceInner {
                repository: self.repository,
                engine,
                latency: LatencySimulator::new(self.config.latency.clone()),
                metrics: self.metrics,
                config: self.config,
            }),
        }
    }
}
