//! Query engine - the per-view algorithms over borrowed tables.
//!
//! [`QueryEngine`] is synchronous and side-effect free. It receives whole tables as
//! slices and returns freshly built rows. Latency, repository access and the error
//! boundary live one layer up in [`DashboardService`](crate::DashboardService).

use crate::config::ServiceConfig;
use crate::entity::{Customer, Invoice};
use crate::error::Result;
use crate::format::{CurrencyFormatter, UsdFormatter};
use crate::query::{
    join_invoices, page_count, sort_by_date_desc, totals_by_customer, CustomerIndex, Page,
    SearchQuery, StatusTotals,
};
use crate::rows::{CardData, CustomerField, CustomerSummaryRow, InvoiceRow, LatestInvoice};

/// Core query engine.
///
/// # Example
///
/// ```
/// use dashboard_kit::QueryEngine;
/// use dashboard_kit::config::ServiceConfig;
/// use dashboard_kit::entity::{Customer, Invoice, InvoiceStatus};
///
/// let engine = QueryEngine::new(&ServiceConfig::default());
/// let customers = vec![Customer {
///     id: "c1".to_string(),
///     name: "Ada".to_string(),
///     email: "ada@example.com".to_string(),
///     image_url: String::new(),
/// }];
/// let invoices = vec![Invoice {
///     id: "i1".to_string(),
///     customer_id: "c1".to_string(),
///     amount: 100,
///     status: InvoiceStatus::Paid,
///     date: "2024-01-01".to_string(),
/// }];
///
/// let cards = engine.card_data(&customers, &invoices);
/// assert_eq!(cards.total_paid_invoices, "$1.00");
/// assert_eq!(cards.total_pending_invoices, "$0.00");
/// ```
pub struct QueryEngine {
    formatter: Box<dyn CurrencyFormatter>,
    items_per_page: usize,
    latest_invoices: usize,
}

impl QueryEngine {
    /// Create an engine with the default US-dollar formatter.
    pub fn new(config: &ServiceConfig) -> Self {
        QueryEngine {
            formatter: Box::new(UsdFormatter),
            items_per_page: config.items_per_page,
            latest_invoices: config.latest_invoices,
        }
    }

    /// Set a custom currency formatter.
    pub fn with_formatter(mut self, formatter: Box<dyn CurrencyFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Most recent invoices joined with their customers, newest first.
    ///
    /// # Errors
    /// Returns `Error::MissingCustomer` if any selected invoice has no customer.
    pub fn latest_invoices(
        &self,
        customers: &[Customer],
        invoices: &[Invoice],
    ) -> Result<Vec<LatestInvoice>> {
        let index = CustomerIndex::new(customers);

        let mut recent: Vec<&Invoice> = invoices.iter().collect();
        sort_by_date_desc(&mut recent, |invoice| invoice.date.as_str());
        recent.truncate(self.latest_invoices);

        recent
            .into_iter()
            .map(|invoice| {
                let customer = index.resolve(invoice)?;
                Ok(LatestInvoice {
                    id: invoice.id.clone(),
                    amount: self.formatter.format(invoice.amount),
                    name: customer.name.clone(),
                    image_url: customer.image_url.clone(),
                    email: customer.email.clone(),
                })
            })
            .collect()
    }

    /// Dashboard KPI cards.
    pub fn card_data(&self, customers: &[Customer], invoices: &[Invoice]) -> CardData {
        let totals = StatusTotals::from_invoices(invoices);

        CardData {
            number_of_customers: customers.len(),
            number_of_invoices: invoices.len(),
            total_paid_invoices: self.formatter.format(totals.paid),
            total_pending_invoices: self.formatter.format(totals.pending),
        }
    }

    /// Every joined invoice row matching `query`, newest first.
    ///
    /// All invoices are joined before filtering, so an orphan invoice fails the call
    /// even when it would not have matched.
    ///
    /// # Errors
    /// Returns `Error::MissingCustomer` if any invoice has no customer.
    pub fn matching_invoices(
        &self,
        customers: &[Customer],
        invoices: &[Invoice],
        query: &str,
    ) -> Result<Vec<InvoiceRow>> {
        let index = CustomerIndex::new(customers);
        let search = SearchQuery::new(query);

        let mut rows = join_invoices(invoices, &index)?;
        sort_by_date_desc(&mut rows, |row| row.date.as_str());
        rows.retain(|row| search.matches_invoice(row));

        Ok(rows)
    }

    /// One page of the filtered invoice listing.
    ///
    /// # Errors
    /// Returns `Error::MissingCustomer` if any invoice has no customer.
    pub fn filtered_invoices(
        &self,
        customers: &[Customer],
        invoices: &[Invoice],
        query: &str,
        current_page: usize,
    ) -> Result<Vec<InvoiceRow>> {
        let rows = self.matching_invoices(customers, invoices, query)?;
        let page = Page::new(current_page, self.items_per_page);
        Ok(page.window(rows))
    }

    /// How many pages `filtered_invoices` spans for `query`.
    ///
    /// # Errors
    /// Returns `Error::MissingCustomer` if any invoice has no customer.
    pub fn invoice_pages(
        &self,
        customers: &[Customer],
        invoices: &[Invoice],
        query: &str,
    ) -> Result<usize> {
        let index = CustomerIndex::new(customers);
        let search = SearchQuery::new(query);

        let matching = join_invoices(invoices, &index)?
            .iter()
            .filter(|row| search.matches_invoice(row))
            .count();

        Ok(page_count(matching, self.items_per_page))
    }

    /// All customers as `{id, name}`, ordered by name.
    pub fn customer_fields(&self, customers: &[Customer]) -> Vec<CustomerField> {
        let mut fields: Vec<CustomerField> = customers
            .iter()
            .map(|customer| CustomerField {
                id: customer.id.clone(),
                name: customer.name.clone(),
            })
            .collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        fields
    }

    /// Customers matching `query` on name or email, with invoice aggregates.
    ///
    /// Left-join semantics: a customer with no invoices still appears, with zero totals.
    pub fn filtered_customers(
        &self,
        customers: &[Customer],
        invoices: &[Invoice],
        query: &str,
    ) -> Vec<CustomerSummaryRow> {
        let search = SearchQuery::new(query);
        let groups = totals_by_customer(invoices);

        let mut matching: Vec<&Customer> = customers
            .iter()
            .filter(|customer| search.matches_customer(customer))
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name));

        matching
            .into_iter()
            .map(|customer| {
                let totals = groups
                    .get(customer.id.as_str())
                    .copied()
                    .unwrap_or_default();

                CustomerSummaryRow {
                    id: customer.id.clone(),
                    name: customer.name.clone(),
                    email: customer.email.clone(),
                    image_url: customer.image_url.clone(),
                    total_invoices: totals.count,
                    total_pending: self.formatter.format(totals.pending),
                    total_paid: self.formatter.format(totals.paid),
                }
            })
            .collect()
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(&ServiceConfig::default())
    }
}
