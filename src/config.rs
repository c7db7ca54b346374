//! Service configuration.

use crate::error::{Error, Result};
use crate::latency::LatencyPolicy;
use serde::{Deserialize, Serialize};

/// Rows per page of the invoices table.
pub const ITEMS_PER_PAGE: usize = 6;

/// Rows returned by the latest-invoices view.
pub const LATEST_INVOICES_LIMIT: usize = 5;

/// Settings shared by every operation of a [`DashboardService`](crate::DashboardService).
///
/// # Example
///
/// ```
/// use dashboard_kit::config::ServiceConfig;
/// use dashboard_kit::latency::LatencyPolicy;
///
/// let config = ServiceConfig::default()
///     .with_items_per_page(10)
///     .with_latency(LatencyPolicy::Disabled);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Page size for the filtered invoices listing. Must be non-zero.
    pub items_per_page: usize,

    /// How many invoices the latest-invoices view returns.
    pub latest_invoices: usize,

    /// Delay applied before every read.
    pub latency: LatencyPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            items_per_page: ITEMS_PER_PAGE,
            latest_invoices: LATEST_INVOICES_LIMIT,
            latency: LatencyPolicy::default(),
        }
    }
}

impl ServiceConfig {
    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    pub fn with_latest_invoices(mut self, latest_invoices: usize) -> Self {
        self.latest_invoices = latest_invoices;
        self
    }

    pub fn with_latency(mut self, latency: LatencyPolicy) -> Self {
        self.latency = latency;
        self
    }

    /// Check invariants that the query engine relies on.
    ///
    /// # Errors
    /// Returns `Error::ConfigError` if `items_per_page` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.items_per_page == 0 {
            return Err(Error::ConfigError(
                "items_per_page must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    ///
    /// ```
    /// use dashboard_kit::config::ServiceConfig;
    ///
    /// let config = ServiceConfig::from_json_str(r#"{"latency":{"mode":"disabled"}}"#).unwrap();
    /// assert_eq!(config.items_per_page, 6);
    /// ```
    ///
    /// # Errors
    /// Returns `Error::DeserializationError` for malformed input, or `Error::ConfigError`
    /// if the parsed values are invalid.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ServiceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.items_per_page, 6);
        assert_eq!(config.latest_invoices, 5);
        assert_eq!(config.latency, LatencyPolicy::Uniform { max_ms: 5000 });
    }

    #[test]
    fn test_builder() {
        let config = ServiceConfig::default()
            .with_items_per_page(3)
            .with_latest_invoices(2)
            .with_latency(LatencyPolicy::Fixed { ms: 10 });

        assert_eq!(config.items_per_page, 3);
        assert_eq!(config.latest_invoices, 2);
        assert_eq!(config.latency, LatencyPolicy::Fixed { ms: 10 });
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let config = ServiceConfig::default().with_items_per_page(0);
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));

        let parsed = ServiceConfig::from_json_str(r#"{"items_per_page":0}"#);
        assert!(matches!(parsed, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_from_json_partial() {
        let config = ServiceConfig::from_json_str(
            r#"{"latest_invoices":3,"latency":{"mode":"uniform","max_ms":100}}"#,
        )
        .unwrap();

        assert_eq!(config.items_per_page, ITEMS_PER_PAGE);
        assert_eq!(config.latest_invoices, 3);
        assert_eq!(config.latency, LatencyPolicy::Uniform { max_ms: 100 });
    }

    #[test]
    fn test_from_json_malformed() {
        let parsed = ServiceConfig::from_json_str("not json");
        assert!(matches!(parsed, Err(Error::DeserializationError(_))));
    }
}
