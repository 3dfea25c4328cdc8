use serde::{Deserialize, Serialize};

use crate::models::{Customer, CustomerProfile, LoadState};
use crate::services::customers::{customer_totals, CustomerTotals};
use crate::services::store::AppStore;
use crate::utils::format_currency;

const NOTHING_OUTSTANDING: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCard {
    #[serde(flatten)]
    pub customer: Customer,
    pub outstanding_display: String,
    pub has_overdue: bool,
    pub all_paid: bool,
}

impl From<Customer> for CustomerCard {
    fn from(customer: Customer) -> Self {
        let all_paid = customer.total_outstanding == 0.0;
        CustomerCard {
            outstanding_display: outstanding_display(customer.total_outstanding),
            has_overdue: customer.overdue_count > 0,
            all_paid,
            customer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomersPage {
    pub cards: Vec<CustomerCard>,
    pub totals: CustomerTotals,
    pub total_outstanding_display: String,
    pub profiles: Vec<CustomerProfile>,
    pub load: LoadState,
}

fn outstanding_display(amount: f64) -> String {
    if amount == 0.0 {
        NOTHING_OUTSTANDING.to_string()
    } else {
        format_currency(amount)
    }
}

pub fn customers_page(store: &AppStore) -> CustomersPage {
    let customers = store.customers();
    let totals = customer_totals(&customers);
    CustomersPage {
        total_outstanding_display: format_currency(totals.total_outstanding),
        totals,
        cards: customers.into_iter().map(CustomerCard::from).collect(),
        profiles: store.customer_profiles().to_vec(),
        load: store.customers_state.clone(),
    }
}
