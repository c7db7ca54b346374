//! Metrics hooks for query operations.
//!
//! Implement [`QueryMetrics`] to forward timings and failures to a monitoring system:
//!
//! ```ignore
//! use dashboard_kit::observability::QueryMetrics;
//! use dashboard_kit::Operation;
//! use std::time::Duration;
//!
//! struct PrometheusMetrics;
//!
//! impl QueryMetrics for PrometheusMetrics {
//!     fn record_success(&self, operation: Operation, elapsed: Duration) {
//!         // histogram!("query_latency", "op" => operation.to_string()).record(elapsed);
//!     }
//! }
//!
//! // let service = DashboardService::new(repo)
//! //     .with_metrics(Box::new(PrometheusMetrics));
//! ```
//!
//! The default methods log through the `log` crate. [`NoOpMetrics`] discards everything
//! and is what a service uses unless told otherwise.

use crate::operation::Operation;
use std::time::Duration;

/// Trait for query metrics collection.
pub trait QueryMetrics: Send + Sync {
    /// Record a completed operation and its total wall time (latency included).
    fn record_success(&self, operation: Operation, elapsed: Duration) {
        debug!("Query OK: {} took {:?}", operation, elapsed);
    }

    /// Record a failed operation with its internal cause.
    fn record_failure(&self, operation: Operation, cause: &str) {
        warn!("Query FAILED: {}: {}", operation, cause);
    }

    /// Record the simulated delay applied to an operation.
    fn record_latency(&self, operation: Operation, delay: Duration) {
        debug!("Query LATENCY: {} waited {:?}", operation, delay);
    }
}

/// Default metrics implementation (no-op).
#[derive(Clone, Default)]
pub struct NoOpMetrics;

impl QueryMetrics for NoOpMetrics {
    fn record_success(&self, _operation: Operation, _elapsed: Duration) {}
    fn record_failure(&self, _operation: Operation, _cause: &str) {}
    fn record_latency(&self, _operation: Operation, _delay: Duration) {}
}

/// Metrics sink that only logs, using the trait's default methods.
#[derive(Clone, Default)]
pub struct LogMetrics;

impl QueryMetrics for LogMetrics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_noop_metrics() {
        let metrics = NoOpMetrics;
        metrics.record_success(Operation::Revenue, Duration::from_secs(1));
        metrics.record_failure(Operation::Revenue, "boom");
        metrics.record_latency(Operation::Revenue, Duration::from_millis(5));
    }

    #[test]
    fn test_log_metrics_uses_defaults() {
        let metrics = LogMetrics;
        metrics.record_success(Operation::CardData, Duration::from_millis(3));
        metrics.record_failure(Operation::CardData, "boom");
    }

    #[test]
    fn test_custom_metrics_override() {
        #[derive(Default)]
        struct CountingMetrics {
            failures: Arc<Mutex<Vec<Operation>>>,
        }

        impl QueryMetrics for CountingMetrics {
            fn record_failure(&self, operation: Operation, _cause: &str) {
                self.failures.lock().unwrap().push(operation);
            }
        }

        let failures = Arc::new(Mutex::new(Vec::new()));
        let metrics = CountingMetrics {
            failures: failures.clone(),
        };

        metrics.record_failure(Operation::InvoiceById, "missing");
        assert_eq!(*failures.lock().unwrap(), vec![Operation::InvoiceById]);
    }
}
