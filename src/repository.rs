//! Data repository trait for abstracting dataset access.
//!
//! The `DataRepository` trait decouples the query engine from where customers, invoices and
//! revenue actually live. Every operation of
//! [`DashboardService`](crate::DashboardService) reads through an injected repository, so
//! tests substitute fixtures without touching any process-wide state.
//!
//! # Implementing DataRepository
//!
//! Implement this trait for any source that can hand back whole tables:
//! - In-memory snapshots (provided in this module)
//! - SQL databases behind a connection pool
//! - Fixtures that fail on purpose, for exercising error paths
//!
//! # Example
//!
//! ```
//! use dashboard_kit::repository::{DataRepository, InMemoryRepository};
//! use dashboard_kit::entity::Customer;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> dashboard_kit::Result<()> {
//! let repo = InMemoryRepository::new(
//!     vec![Customer {
//!         id: "c1".to_string(),
//!         name: "Ada".to_string(),
//!         email: "ada@example.com".to_string(),
//!         image_url: "/customers/ada.png".to_string(),
//!     }],
//!     vec![],
//!     vec![],
//! );
//!
//! assert_eq!(repo.customer_count().await?, 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Return `Err` for anything that prevents a read: unavailable storage, decode failures,
//! timeouts. The service logs the cause and reports only an opaque failure to its caller.

use crate::entity::{Customer, Invoice, Revenue};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Trait for read-only dataset implementations.
///
/// Tables are returned as shared slices. Implementations must never hand out a view
/// that changes after it is returned.
#[allow(async_fn_in_trait)]
pub trait DataRepository: Send + Sync {
    /// All customers, in storage order.
    ///
    /// # Errors
    /// Returns `Err` if the data source is unavailable or the read fails
    async fn customers(&self) -> Result<Arc<[Customer]>>;

    /// All invoices, in storage order.
    ///
    /// # Errors
    /// Returns `Err` if the data source is unavailable or the read fails
    async fn invoices(&self) -> Result<Arc<[Invoice]>>;

    /// The precomputed revenue series.
    ///
    /// # Errors
    /// Returns `Err` if the data source is unavailable or the read fails
    async fn revenue(&self) -> Result<Arc<[Revenue]>>;

    /// Look up one invoice by its id.
    ///
    /// Default implementation scans `invoices()`. Override with an indexed lookup where
    /// the source has one.
    ///
    /// # Returns
    /// - `Ok(Some(invoice))` - Invoice found
    /// - `Ok(None)` - No invoice with that id (not an error)
    ///
    /// # Errors
    /// Returns `Err` if the data source is unavailable or the read fails
    async fn find_invoice(&self, id: &str) -> Result<Option<Invoice>> {
        Ok(self
            .invoices()
            .await?
            .iter()
            .find(|invoice| invoice.id == id)
            .cloned())
    }

    /// Number of customers.
    ///
    /// # Errors
    /// Returns `Err` if the data source is unavailable or the read fails
    async fn customer_count(&self) -> Result<usize> {
        Ok(self.customers().await?.len())
    }

    /// Number of invoices.
    ///
    /// # Errors
    /// Returns `Err` if the data source is unavailable or the read fails
    async fn invoice_count(&self) -> Result<usize> {
        Ok(self.invoices().await?.len())
    }
}

/// Serialized form of a whole dataset. Missing tables default to empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSnapshot {
    pub customers: Vec<Customer>,
    pub invoices: Vec<Invoice>,
    pub revenue: Vec<Revenue>,
}

// ============================================================================
// In-Memory Repository
// ============================================================================

/// Immutable, process-resident dataset.
///
/// Populated once and shared for the process lifetime. Cloning is cheap (three `Arc`
/// increments) and every clone sees the same tables.
#[derive(Clone, Debug)]
pub struct InMemoryRepository {
    customers: Arc<[Customer]>,
    invoices: Arc<[Invoice]>,
    revenue: Arc<[Revenue]>,
}

impl InMemoryRepository {
    /// Create a repository from owned tables.
    pub fn new(customers: Vec<Customer>, invoices: Vec<Invoice>, revenue: Vec<Revenue>) -> Self {
        debug!(
            "InMemory dataset loaded: {} customers, {} invoices, {} revenue periods",
            customers.len(),
            invoices.len(),
            revenue.len()
        );

        InMemoryRepository {
            customers: customers.into(),
            invoices: invoices.into(),
            revenue: revenue.into(),
        }
    }

    /// An empty dataset.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }

    pub fn from_snapshot(snapshot: DatasetSnapshot) -> Self {
        Self::new(snapshot.customers, snapshot.invoices, snapshot.revenue)
    }

    /// Load a dataset from its JSON snapshot form.
    ///
    /// ```
    /// use dashboard_kit::repository::InMemoryRepository;
    ///
    /// let repo = InMemoryRepository::from_json_str(
    ///     r#"{"customers":[{"id":"c1","name":"Ada","email":"ada@example.com","image_url":""}]}"#,
    /// ).unwrap();
    ///
    /// assert_eq!(repo.customer_len(), 1);
    /// assert_eq!(repo.invoice_len(), 0);
    /// ```
    ///
    /// # Errors
    /// Returns `Error::DeserializationError` if the JSON does not describe a dataset.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: DatasetSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// The built-in demo dataset.
    #[cfg(feature = "placeholder")]
    pub fn placeholder() -> Self {
        Self::from_snapshot(crate::placeholder::snapshot())
    }

    pub fn customer_len(&self) -> usize {
        self.customers.len()
    }

    pub fn invoice_len(&self) -> usize {
        self.invoices.len()
    }

    /// Return true if the dataset holds no customers and no invoices.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty() && self.invoices.is_empty()
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::empty()
    }
}

impl DataRepository for InMemoryRepository {
    async fn customers(&self) -> Result<Arc<[Customer]>> {
        Ok(Arc::clone(&self.customers))
    }

    async fn invoices(&self) -> Result<Arc<[Invoice]>> {
        Ok(Arc::clone(&self.invoices))
    }

    async fn revenue(&self) -> Result<Arc<[Revenue]>> {
        Ok(Arc::clone(&self.revenue))
    }

    async fn find_invoice(&self, id: &str) -> Result<Option<Invoice>> {
        Ok(self.invoices.iter().find(|invoice| invoice.id == id).cloned())
    }

    async fn customer_count(&self) -> Result<usize> {
        Ok(self.customers.len())
    }

    async fn invoice_count(&self) -> Result<usize> {
        Ok(self.invoices.len())
    }
}
