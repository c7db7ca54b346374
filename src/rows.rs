//! Derived records produced per call. None of these are stored.

use crate::entity::{Customer, Invoice, InvoiceStatus, Revenue};
use serde::{Deserialize, Serialize};

/// A recent invoice joined with its customer's display fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestInvoice {
    pub id: String,
    /// Formatted amount, e.g. `"$157.95"`.
    pub amount: String,
    pub name: String,
    pub image_url: String,
    pub email: String,
}

/// One row of the invoices table: an invoice merged with its customer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRow {
    pub id: String,
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub date: String,
    /// Integer cents.
    pub amount: i64,
    pub status: InvoiceStatus,
}

impl InvoiceRow {
    pub fn join(invoice: &Invoice, customer: &Customer) -> Self {
        InvoiceRow {
            id: invoice.id.clone(),
            customer_id: invoice.customer_id.clone(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            image_url: customer.image_url.clone(),
            date: invoice.date.clone(),
            amount: invoice.amount,
            status: invoice.status.clone(),
        }
    }
}

/// Dashboard KPI cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub number_of_customers: usize,
    pub number_of_invoices: usize,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}

/// Minimal customer reference for pickers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerField {
    pub id: String,
    pub name: String,
}

/// A customer with aggregates over the invoices it owns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummaryRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: usize,
    pub total_pending: String,
    pub total_paid: String,
}

/// An invoice prepared for editing. `amount` is in currency units, not cents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvoiceForm {
    pub id: String,
    pub customer_id: String,
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl From<&Invoice> for InvoiceForm {
    fn from(invoice: &Invoice) -> Self {
        InvoiceForm {
            id: invoice.id.clone(),
            customer_id: invoice.customer_id.clone(),
            amount: invoice.amount as f64 / 100.0,
            status: invoice.status.clone(),
        }
    }
}

/// Everything the dashboard landing view shows, fetched in one call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub revenue: Vec<Revenue>,
    pub latest_invoices: Vec<LatestInvoice>,
    pub cards: CardData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_form_converts_cents() {
        let invoice = Invoice {
            id: "i1".to_string(),
            customer_id: "c1".to_string(),
            amount: 15795,
            status: InvoiceStatus::Pending,
            date: "2022-12-06".to_string(),
        };

        let form = InvoiceForm::from(&invoice);
        assert_eq!(form.amount, 157.95);
        assert_eq!(form.customer_id, "c1");
    }

    #[test]
    fn test_card_data_serializes_camel_case() {
        let cards = CardData {
            number_of_customers: 1,
            number_of_invoices: 2,
            total_paid_invoices: "$1.00".to_string(),
            total_pending_invoices: "$0.00".to_string(),
        };

        let json = serde_json::to_value(&cards).unwrap();
        assert_eq!(json["numberOfCustomers"], 1);
        assert_eq!(json["totalPendingInvoices"], "$0.00");
    }
}
