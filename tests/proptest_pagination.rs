//! Property-based tests for filtering, pagination and aggregation.
//!
//! # Properties Tested
//!
//! 1. **Coverage Property**: pages `1..=page_count` union to exactly the matching rows
//! 2. **Bound Property**: `page_count * per_page >= matches`, and no page exceeds `per_page`
//! 3. **Totals Property**: only `paid` and `pending` amounts reach the card sums
//! 4. **Order Property**: listing rows are newest first

use dashboard_kit::query::{page_count, Page, StatusTotals};
use dashboard_kit::{Customer, Invoice, InvoiceStatus, QueryEngine, ServiceConfig};
use proptest::prelude::*;
use std::collections::HashSet;

// ============================================================================
// Generators
// ============================================================================

fn arb_customers() -> impl Strategy<Value = Vec<Customer>> {
    prop::collection::vec(("[A-Za-z]{1,8}", "[a-z]{1,6}"), 1..8).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (name, mailbox))| Customer {
                id: format!("c{}", i),
                name,
                email: format!("{}@example.com", mailbox),
                image_url: String::new(),
            })
            .collect()
    })
}

fn arb_status() -> impl Strategy<Value = InvoiceStatus> {
    prop_oneof![
        4 => Just(InvoiceStatus::Paid),
        4 => Just(InvoiceStatus::Pending),
        1 => "[a-z]{3,8}".prop_map(|raw: String| InvoiceStatus::from(raw)),
    ]
}

/// Customers plus invoices that all reference one of them.
fn arb_dataset() -> impl Strategy<Value = (Vec<Customer>, Vec<Invoice>)> {
    arb_customers().prop_flat_map(|customers| {
        let owners = customers.len();
        let invoice = (
            0..owners,
            0i64..1_000_000,
            arb_status(),
            (2020u32..2025, 1u32..13, 1u32..29),
        );
        (
            Just(customers),
            prop::collection::vec(invoice, 0..40).prop_map(|drafts| {
                drafts
                    .into_iter()
                    .enumerate()
                    .map(|(i, (owner, amount, status, (y, m, d)))| Invoice {
                        id: format!("inv-{}", i),
                        customer_id: format!("c{}", owner),
                        amount,
                        status,
                        date: format!("{:04}-{:02}-{:02}", y, m, d),
                    })
                    .collect()
            }),
        )
    })
}

fn arb_query() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-z0-9@-]{1,3}", "(paid|PENDING|example)"]
}

fn engine(per_page: usize) -> QueryEngine {
    QueryEngine::new(&ServiceConfig::default().with_items_per_page(per_page))
}

// ============================================================================
// Coverage & Bound Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_pages_cover_matches_exactly(
        (customers, invoices) in arb_dataset(),
        query in arb_query(),
        per_page in 1usize..10,
    ) {
        let engine = engine(per_page);
        let matching = engine.matching_invoices(&customers, &invoices, &query).unwrap();
        let pages = engine.invoice_pages(&customers, &invoices, &query).unwrap();

        prop_assert_eq!(pages, page_count(matching.len(), per_page));
        prop_assert!(pages * per_page >= matching.len());

        let mut seen = Vec::new();
        for number in 1..=pages {
            let page = engine.filtered_invoices(&customers, &invoices, &query, number).unwrap();
            prop_assert!(!page.is_empty());
            prop_assert!(page.len() <= per_page);
            seen.extend(page);
        }

        prop_assert_eq!(&seen, &matching);

        let ids: HashSet<&str> = seen.iter().map(|row| row.id.as_str()).collect();
        prop_assert_eq!(ids.len(), seen.len(), "rows must not repeat across pages");

        let past_end = engine.filtered_invoices(&customers, &invoices, &query, pages + 1).unwrap();
        prop_assert!(past_end.is_empty());
    }

    #[test]
    fn prop_window_is_offset_slice(len in 0usize..60, number in 0usize..12, per_page in 1usize..10) {
        let items: Vec<usize> = (0..len).collect();
        let page = Page::new(number, per_page);
        let window = page.window(items.iter().copied());

        let start = page.offset().min(len);
        let end = (page.offset() + per_page).min(len);
        prop_assert_eq!(window, items[start..end].to_vec());
    }
}

// ============================================================================
// Totals & Order Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_totals_ignore_unknown_status((_, invoices) in arb_dataset()) {
        let totals = StatusTotals::from_invoices(&invoices);

        let paid: i64 = invoices
            .iter()
            .filter(|i| i.status == InvoiceStatus::Paid)
            .map(|i| i.amount)
            .sum();
        let pending: i64 = invoices
            .iter()
            .filter(|i| i.status == InvoiceStatus::Pending)
            .map(|i| i.amount)
            .sum();

        prop_assert_eq!(totals.count, invoices.len());
        prop_assert_eq!(totals.paid, paid);
        prop_assert_eq!(totals.pending, pending);
    }

    #[test]
    fn prop_customer_table_counts_sum_to_invoices((customers, invoices) in arb_dataset()) {
        let rows = engine(6).filtered_customers(&customers, &invoices, "");

        prop_assert_eq!(rows.len(), customers.len());
        let counted: usize = rows.iter().map(|row| row.total_invoices).sum();
        prop_assert_eq!(counted, invoices.len());
    }

    #[test]
    fn prop_listing_newest_first((customers, invoices) in arb_dataset(), query in arb_query()) {
        let rows = engine(6).matching_invoices(&customers, &invoices, &query).unwrap();

        for pair in rows.windows(2) {
            prop_assert!(pair[0].date >= pair[1].date);
        }
    }
}
