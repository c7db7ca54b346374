//! Relational building blocks over in-memory tables.
//!
//! These functions stand in for what a SQL backend would otherwise provide:
//!
//! | SQL | Here |
//! |-----|------|
//! | `JOIN customers ON invoices.customer_id = customers.id` | [`CustomerIndex`], [`join_invoices`] |
//! | `ORDER BY date DESC` | [`sort_by_date_desc`] (stable) |
//! | `WHERE ... ILIKE '%q%' OR ...` | [`SearchQuery`] |
//! | `SUM(CASE WHEN status = ...)` / `COUNT(*)` | [`StatusTotals`] |
//! | `LIMIT n OFFSET m` | [`Page`], [`page_count`] |
//!
//! Nothing here mutates its input. Every function builds fresh values.

use crate::entity::{Customer, Entity, Invoice, InvoiceStatus};
use crate::error::{Error, Result};
use crate::rows::InvoiceRow;
use std::collections::HashMap;

// ============================================================================
// Join
// ============================================================================

/// Customers keyed by id, for resolving `invoice.customer_id`.
pub struct CustomerIndex<'a> {
    by_id: HashMap<String, &'a Customer>,
}

impl<'a> CustomerIndex<'a> {
    /// Index `customers`. If an id repeats, the first occurrence wins.
    pub fn new(customers: &'a [Customer]) -> Self {
        let mut by_id = HashMap::with_capacity(customers.len());
        for customer in customers {
            by_id.entry(customer.entity_id()).or_insert(customer);
        }
        CustomerIndex { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Customer> {
        self.by_id.get(id).copied()
    }

    /// Find the owner of `invoice`.
    ///
    /// # Errors
    /// Returns `Error::MissingCustomer` if the invoice's `customer_id` does not resolve.
    pub fn resolve(&self, invoice: &Invoice) -> Result<&'a Customer> {
        self.get(&invoice.customer_id).ok_or_else(|| {
            warn!(
                "{} {} has no matching {} {}",
                Invoice::entity_kind(),
                invoice.entity_id(),
                Customer::entity_kind(),
                invoice.customer_id
            );
            Error::MissingCustomer {
                invoice_id: invoice.id.clone(),
                customer_id: invoice.customer_id.clone(),
            }
        })
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Inner-join every invoice with its customer, keeping invoice order.
///
/// # Errors
/// Fails on the first invoice whose customer is missing; no partial result is returned.
pub fn join_invoices<'i, I>(invoices: I, customers: &CustomerIndex<'_>) -> Result<Vec<InvoiceRow>>
where
    I: IntoIterator<Item = &'i Invoice>,
{
    invoices
        .into_iter()
        .map(|invoice| Ok(InvoiceRow::join(invoice, customers.resolve(invoice)?)))
        .collect()
}

// ============================================================================
// Sort
// ============================================================================

/// Sort newest first by an ISO-8601 date key.
///
/// Plain string comparison orders same-format ISO dates correctly. The sort is stable:
/// rows with equal dates keep their relative order.
pub fn sort_by_date_desc<T, F>(rows: &mut [T], date: F)
where
    F: Fn(&T) -> &str,
{
    rows.sort_by(|a, b| date(b).cmp(date(a)));
}

// ============================================================================
// Filter
// ============================================================================

/// Case-insensitive substring search, the in-memory form of `ILIKE '%q%'`.
///
/// An empty query matches everything.
///
/// ```
/// use dashboard_kit::query::SearchQuery;
///
/// let query = SearchQuery::new("LEE");
/// assert!(query.matches_text("lee@robinson.com"));
/// assert!(!query.matches_text("amy@burns.com"));
/// assert!(SearchQuery::new("").matches_text("anything"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        SearchQuery {
            needle: raw.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches_text(&self, haystack: &str) -> bool {
        self.needle.is_empty() || haystack.to_lowercase().contains(&self.needle)
    }

    /// Invoice listing predicate: name, email, amount in cents, date, or status.
    pub fn matches_invoice(&self, row: &InvoiceRow) -> bool {
        self.is_empty()
            || self.matches_text(&row.name)
            || self.matches_text(&row.email)
            || self.matches_text(&row.amount.to_string())
            || self.matches_text(&row.date)
            || self.matches_text(row.status.as_str())
    }

    /// Customer table predicate: name or email.
    pub fn matches_customer(&self, customer: &Customer) -> bool {
        self.is_empty() || self.matches_text(&customer.name) || self.matches_text(&customer.email)
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Invoice count and per-status sums, in cents.
///
/// Statuses other than `paid` and `pending` are counted but added to neither sum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusTotals {
    pub count: usize,
    pub paid: i64,
    pub pending: i64,
}

impl StatusTotals {
    pub fn add(&mut self, invoice: &Invoice) {
        self.count += 1;
        match invoice.status {
            InvoiceStatus::Paid => self.paid = self.paid.saturating_add(invoice.amount),
            InvoiceStatus::Pending => self.pending = self.pending.saturating_add(invoice.amount),
            InvoiceStatus::Other(_) => {}
        }
    }

    pub fn from_invoices<'a, I>(invoices: I) -> Self
    where
        I: IntoIterator<Item = &'a Invoice>,
    {
        let mut totals = StatusTotals::default();
        for invoice in invoices {
            totals.add(invoice);
        }
        totals
    }
}

/// Group invoices by `customer_id`.
pub fn totals_by_customer<'a, I>(invoices: I) -> HashMap<&'a str, StatusTotals>
where
    I: IntoIterator<Item = &'a Invoice>,
{
    let mut groups: HashMap<&'a str, StatusTotals> = HashMap::new();
    for invoice in invoices {
        groups
            .entry(invoice.customer_id.as_str())
            .or_default()
            .add(invoice);
    }
    groups
}

// ============================================================================
// Paginate
// ============================================================================

/// One page of a listing: the window `[offset, offset + per_page)`.
///
/// ```
/// use dashboard_kit::query::Page;
///
/// let page = Page::new(2, 6);
/// assert_eq!(page.offset(), 6);
/// assert_eq!(page.window(0..20), vec![6, 7, 8, 9, 10, 11]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    number: usize,
    per_page: usize,
}

impl Page {
    /// `number` is 1-based; anything below 1 is treated as the first page.
    pub fn new(number: usize, per_page: usize) -> Self {
        Page {
            number: number.max(1),
            per_page,
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn offset(&self) -> usize {
        (self.number - 1).saturating_mul(self.per_page)
    }

    /// Skip `offset()` items, then take up to `per_page()`.
    pub fn window<I>(&self, items: I) -> Vec<I::Item>
    where
        I: IntoIterator,
    {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.per_page)
            .collect()
    }
}

/// Number of pages needed for `total` rows, `ceil(total / per_page)`.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}
