use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::api::ApiCustomer;
use crate::models::{Customer, CustomerProfile, Invoice, InvoiceStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerTotals {
    pub total_customers: usize,
    pub total_outstanding: f64,
    pub customers_with_overdue: usize,
}

pub fn customer_id(name: &str) -> String {
    format!("cust-{}", name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-"))
}

/// Groups invoices by customer name in one pass, keeping first-seen order.
pub fn aggregate_customers(invoices: &[Invoice]) -> Vec<Customer> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut customers: Vec<Customer> = Vec::new();

    for invoice in invoices {
        let is_overdue = invoice.status == InvoiceStatus::Overdue;
        let outstanding = if invoice.status == InvoiceStatus::Paid {
            0.0
        } else {
            invoice.amount
        };

        match index.get(invoice.customer_name.as_str()) {
            Some(&position) => {
                let existing = &mut customers[position];
                existing.invoice_count += 1;
                existing.total_outstanding += outstanding;
                if is_overdue {
                    existing.overdue_count += 1;
                }
            }
            None => {
                index.insert(invoice.customer_name.as_str(), customers.len());
                customers.push(Customer {
                    id: customer_id(&invoice.customer_name),
                    name: invoice.customer_name.clone(),
                    invoice_count: 1,
                    total_outstanding: outstanding,
                    overdue_count: usize::from(is_overdue),
                });
            }
        }
    }

    customers
}

pub fn customer_totals(customers: &[Customer]) -> CustomerTotals {
    CustomerTotals {
        total_customers: customers.len(),
        total_outstanding: customers.iter().map(|c| c.total_outstanding).sum(),
        customers_with_overdue: customers.iter().filter(|c| c.overdue_count > 0).count(),
    }
}

pub fn profile_from_api(customer: ApiCustomer) -> CustomerProfile {
    CustomerProfile {
        id: customer.id.to_string(),
        name: customer.customer_name,
        email: customer.email,
        total_outstanding: customer.total_outstanding_amount,
        rating: customer.rating,
    }
}
