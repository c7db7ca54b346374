//! Built-in demo dataset: six customers, thirteen invoices, twelve months of revenue.
//!
//! Enabled by the default `placeholder` feature.

use crate::entity::{Customer, Invoice, InvoiceStatus, Revenue};
use crate::repository::DatasetSnapshot;

const CUSTOMERS: &[(&str, &str, &str, &str)] = &[
    (
        "d6e15727-9fe1-4961-8c5b-ea44a9bd81aa",
        "Evil Rabbit",
        "evil@rabbit.com",
        "/customers/evil-rabbit.png",
    ),
    (
        "3958dc9e-712f-4377-85e9-fec4b6a6442a",
        "Delba de Oliveira",
        "delba@oliveira.com",
        "/customers/delba-de-oliveira.png",
    ),
    (
        "3958dc9e-742f-4377-85e9-fec4b6a6442a",
        "Lee Robinson",
        "lee@robinson.com",
        "/customers/lee-robinson.png",
    ),
    (
        "76d65c26-f784-44a2-ac19-586678f7c2f2",
        "Michael Novotny",
        "michael@novotny.com",
        "/customers/michael-novotny.png",
    ),
    (
        "CC27C14A-0ACF-4F4A-A6C9-D45682C144B9",
        "Amy Burns",
        "amy@burns.com",
        "/customers/amy-burns.png",
    ),
    (
        "13D07535-C59E-4157-A011-F8D2EF4E0CBB",
        "Balazs Orban",
        "balazs@orban.com",
        "/customers/balazs-orban.png",
    ),
];

// (invoice id, index into CUSTOMERS, amount in cents, status, date)
const INVOICES: &[(&str, usize, i64, &str, &str)] = &[
    ("2b1d4a0e-7d6f-4f3a-9a51-0c9e6e1f0001", 0, 15795, "pending", "2022-12-06"),
    ("2b1d4a0e-7d6f-4f3a-9a51-0c9e6e1f0002", 1, 20348, "pending", "2022-11-14"),
    ("2b1d4a0e-7d6f-4f3a-9a51-0c9e6e1f0003", 4, 3040, "paid", "2022-10-29"),
    ("2b1d4a0e-7d6f-4f3a-9a51-0c9e6e1f0004", 3, 44800, "paid", "2023-09-10"),
    ("2b1d4a0e-7d6f-4f3a-9a51-0c9e6e1f0005", 5, 34577, "pending", "2023-08-05"),
    ("2b1d4a0e-7d6f-4f3a-9a51-0c9e6e1f0006", 2, 54246, "pending", "2023-07-16"),
    ("2b1d4a0e-7d6f-4f3a-9a51-0c9e6e1f0007", 0, 666, "pending", "2023-06-27"),
    ("2b1d4a0e-7d6f-4f3a-9a51-0c9e6e1f0008", 3, 32545, "paid", "2023-06-09"),
    ("2b1d4a0e-7d6f-4f3a-9a51-0c9e6e1f0009", 4, 1250, "paid", "2023-06-17"),
    ("2b1d4a0e-7d6f-4f3a-9a51-0c9e6e1f0010", 5, 8546, "paid", "2023-06-07"),
    ("2b1d4a0e-7d6f-4f3a-9a51-0c9e6e1f0011", 1, 500, "paid", "2023-08-19"),
    ("2b1d4a0e-7d6f-4f3a-9a51-0c9e6e1f0012", 5, 8945, "paid", "2023-06-03"),
    ("2b1d4a0e-7d6f-4f3a-9a51-0c9e6e1f0013", 2, 1000, "paid", "2022-06-05"),
];

const REVENUE: &[(&str, i64)] = &[
    ("Jan", 2000),
    ("Feb", 1800),
    ("Mar", 2200),
    ("Apr", 2500),
    ("May", 2300),
    ("Jun", 3200),
    ("Jul", 3500),
    ("Aug", 3700),
    ("Sep", 2500),
    ("Oct", 2800),
    ("Nov", 3000),
    ("Dec", 4800),
];

pub fn customers() -> Vec<Customer> {
    CUSTOMERS
        .iter()
        .map(|&(id, name, email, image_url)| Customer {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            image_url: image_url.to_string(),
        })
        .collect()
}

pub fn invoices() -> Vec<Invoice> {
    INVOICES
        .iter()
        .map(|&(id, customer, amount, status, date)| Invoice {
            id: id.to_string(),
            customer_id: CUSTOMERS[customer].0.to_string(),
            amount,
            status: InvoiceStatus::from(status),
            date: date.to_string(),
        })
        .collect()
}

pub fn revenue() -> Vec<Revenue> {
    REVENUE
        .iter()
        .map(|&(month, revenue)| Revenue {
            month: month.to_string(),
            revenue,
        })
        .collect()
}

pub fn snapshot() -> DatasetSnapshot {
    DatasetSnapshot {
        customers: customers(),
        invoices: invoices(),
        revenue: revenue(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_invoice_resolves() {
        let ids: HashSet<String> = customers().into_iter().map(|c| c.id).collect();
        assert!(invoices().iter().all(|i| ids.contains(&i.customer_id)));
    }

    #[test]
    fn test_ids_unique() {
        let invoices = invoices();
        let ids: HashSet<&str> = invoices.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), invoices.len());
    }

    #[test]
    fn test_sizes() {
        let snapshot = snapshot();
        assert_eq!(snapshot.customers.len(), 6);
        assert_eq!(snapshot.invoices.len(), 13);
        assert_eq!(snapshot.revenue.len(), 12);
    }
}
