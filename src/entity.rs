//! Core records held by the dataset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Trait implemented by every record stored in the dataset.
///
/// # Example
///
/// ```
/// use dashboard_kit::entity::{Customer, Entity};
///
/// let customer = Customer {
///     id: "c1".to_string(),
///     name: "Ada".to_string(),
///     email: "ada@example.com".to_string(),
///     image_url: "/customers/ada.png".to_string(),
/// };
///
/// assert_eq!(customer.entity_id(), "c1");
/// assert_eq!(Customer::entity_kind(), "customer");
/// ```
pub trait Entity: Send + Sync + Clone {
    /// Type of the record's identifier.
    type Key: fmt::Display + Clone + Send + Sync + Eq + Hash + 'static;

    /// Return the record's unique identifier.
    fn entity_id(&self) -> Self::Key;

    /// Human-readable record kind, used in log lines and error messages.
    fn entity_kind() -> &'static str;
}

/// A customer. Immutable for the process lifetime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

impl Entity for Customer {
    type Key = String;

    fn entity_id(&self) -> Self::Key {
        self.id.clone()
    }

    fn entity_kind() -> &'static str {
        "customer"
    }
}

/// Invoice status.
///
/// Only `pending` and `paid` are meaningful. Anything else read from a snapshot is kept
/// as [`InvoiceStatus::Other`] so the dataset still loads; such invoices count toward
/// totals of neither bucket.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Other(String),
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for InvoiceStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => InvoiceStatus::Pending,
            "paid" => InvoiceStatus::Paid,
            _ => InvoiceStatus::Other(raw),
        }
    }
}

impl From<&str> for InvoiceStatus {
    fn from(raw: &str) -> Self {
        InvoiceStatus::from(raw.to_string())
    }
}

impl From<InvoiceStatus> for String {
    fn from(status: InvoiceStatus) -> Self {
        match status {
            InvoiceStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An invoice owned by exactly one customer.
///
/// `amount` is in integer cents. `date` is an ISO-8601 `YYYY-MM-DD` string, which orders
/// correctly under plain string comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: String,
}

impl Entity for Invoice {
    type Key = String;

    fn entity_id(&self) -> Self::Key {
        self.id.clone()
    }

    fn entity_kind() -> &'static str {
        "invoice"
    }
}

/// Precomputed revenue for one period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revenue {
    pub month: String,
    pub revenue: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!(InvoiceStatus::from("pending"), InvoiceStatus::Pending);
        assert_eq!(InvoiceStatus::from("paid"), InvoiceStatus::Paid);
        assert_eq!(
            InvoiceStatus::from("void"),
            InvoiceStatus::Other("void".to_string())
        );
        // Case matters: only the exact lowercase forms are recognized.
        assert_eq!(
            InvoiceStatus::from("Paid"),
            InvoiceStatus::Other("Paid".to_string())
        );
    }

    #[test]
    fn test_status_serde_as_plain_string() {
        let json = serde_json::to_string(&InvoiceStatus::Paid).unwrap();
        assert_eq!(json, "\"paid\"");

        let other: InvoiceStatus = serde_json::from_str("\"refunded\"").unwrap();
        assert_eq!(other.as_str(), "refunded");
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"refunded\"");
    }

    #[test]
    fn test_invoice_deserialize() {
        let invoice: Invoice = serde_json::from_str(
            r#"{"id":"i1","customer_id":"c1","amount":100,"status":"paid","date":"2024-01-01"}"#,
        )
        .unwrap();

        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.entity_id(), "i1");
        assert_eq!(Invoice::entity_kind(), "invoice");
    }
}
