//! # dashboard-kit
//!
//! A read-only, async query layer for invoice and customer reporting views.
//!
//! The data lives in an immutable in-memory dataset. Joins, filtering, aggregation,
//! sorting and pagination are done in Rust instead of by a SQL engine, and every call
//! waits on a simulated, randomized I/O delay first.
//!
//! ## Features
//!
//! - **Injected data source:** Any [`DataRepository`] works; [`InMemoryRepository`] is provided
//! - **Relational primitives:** Join, stable date sort, case-insensitive search, status
//!   aggregation, `(offset, limit)` pagination in [`query`]
//! - **Opaque failures:** Callers only ever see a [`DataFetchError`] naming the operation
//! - **Simulated latency:** One composable seam, [`latency::LatencySimulator`], disabled with a
//!   config switch under test
//! - **Observability:** `log` facade throughout, plus pluggable [`observability::QueryMetrics`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use dashboard_kit::{DashboardService, InMemoryRepository};
//!
//! // 1. Load the dataset once at startup
//! let repo = InMemoryRepository::from_json_str(&std::fs::read_to_string("dataset.json")?)?;
//!
//! // 2. Create the service (Clone is cheap - just an Arc increment)
//! let service = DashboardService::new(repo);
//!
//! // 3. Query
//! let cards = service.fetch_card_data().await?;
//! let pages = service.fetch_invoices_pages("lee").await?;
//! let rows = service.fetch_filtered_invoices("lee", 1).await?;
//! ```

#[macro_use]
extern crate log;

pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod format;
pub mod latency;
pub mod observability;
pub mod operation;
#[cfg(feature = "placeholder")]
pub mod placeholder;
pub mod query;
pub mod repository;
pub mod rows;
pub mod service;

// Re-exports for convenience
pub use config::{ServiceConfig, ITEMS_PER_PAGE};
pub use engine::QueryEngine;
pub use entity::{Customer, Entity, Invoice, InvoiceStatus, Revenue};
pub use error::{DataFetchError, Error, FetchResult, Result};
pub use format::{CurrencyFormatter, UsdFormatter};
pub use operation::Operation;
pub use repository::{DataRepository, InMemoryRepository};
pub use rows::{
    CardData, CustomerField, CustomerSummaryRow, InvoiceForm, InvoiceRow, LatestInvoice, Overview,
};
pub use service::{DashboardService, DashboardServiceBuilder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
