//! Names for the boundary operations exposed by [`DashboardService`](crate::DashboardService).

use std::fmt;

/// Every query the service answers.
///
/// Used to tag log lines, metrics, and the [`DataFetchError`](crate::error::DataFetchError)
/// raised when an operation fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Revenue,
    LatestInvoices,
    CardData,
    FilteredInvoices,
    InvoicesPages,
    InvoiceById,
    Customers,
    FilteredCustomers,
    Overview,
}

impl Operation {
    /// Fixed, caller-facing message reported when this operation fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Revenue => "Failed to fetch revenue data.",
            Operation::LatestInvoices => "Failed to fetch the latest invoices.",
            Operation::CardData => "Failed to fetch card data.",
            Operation::FilteredInvoices => "Failed to fetch invoices.",
            Operation::InvoicesPages => "Failed to fetch total number of invoices.",
            Operation::InvoiceById => "Failed to fetch invoice.",
            Operation::Customers => "Failed to fetch all customers.",
            Operation::FilteredCustomers => "Failed to fetch customer table.",
            Operation::Overview => "Failed to fetch dashboard overview.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Revenue => "fetch_revenue",
            Operation::LatestInvoices => "fetch_latest_invoices",
            Operation::CardData => "fetch_card_data",
            Operation::FilteredInvoices => "fetch_filtered_invoices",
            Operation::InvoicesPages => "fetch_invoices_pages",
            Operation::InvoiceById => "fetch_invoice_by_id",
            Operation::Customers => "fetch_customers",
            Operation::FilteredCustomers => "fetch_filtered_customers",
            Operation::Overview => "fetch_overview",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Revenue.to_string(), "fetch_revenue");
        assert_eq!(
            Operation::FilteredCustomers.to_string(),
            "fetch_filtered_customers"
        );
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            Operation::Revenue.failure_message(),
            "Failed to fetch revenue data."
        );
        assert_eq!(
            Operation::LatestInvoices.failure_message(),
            "Failed to fetch the latest invoices."
        );
        assert_eq!(
            Operation::CardData.failure_message(),
            "Failed to fetch card data."
        );
        assert_eq!(
            Operation::FilteredInvoices.failure_message(),
            "Failed to fetch invoices."
        );
        assert_eq!(
            Operation::InvoiceById.failure_message(),
            "Failed to fetch invoice."
        );
    }
}
