use serde::{Deserialize, Serialize};

use crate::models::{InvoiceStatus, LoadState};
use crate::services::store::AppStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub invoice_count: usize,
    pub overdue_invoices: usize,
    pub customer_count: usize,
    pub total_outstanding: f64,
    pub open_tasks: usize,
    pub activity_count: usize,
    pub invoices: LoadState,
    pub customers: LoadState,
    pub tasks: LoadState,
}

pub fn dashboard_snapshot(store: &AppStore) -> DashboardSnapshot {
    let customers = store.customers();
    DashboardSnapshot {
        invoice_count: store.invoices().len(),
        overdue_invoices: store
            .invoices()
            .iter()
            .filter(|inv| inv.status == InvoiceStatus::Overdue)
            .count(),
        customer_count: customers.len(),
        total_outstanding: customers.iter().map(|c| c.total_outstanding).sum(),
        open_tasks: store.open_tasks_count(),
        activity_count: store.activities().len(),
        invoices: store.invoices_state.clone(),
        customers: store.customers_state.clone(),
        tasks: store.tasks_state.clone(),
    }
}
