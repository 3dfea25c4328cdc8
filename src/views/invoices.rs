use serde::{Deserialize, Serialize};

use crate::models::{Invoice, InvoiceStatus, LoadState, SuggestedAction};
use crate::services::store::AppStore;
use crate::utils::format_currency;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFilter {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
}

impl InvoiceFilter {
    pub fn matches(&self, invoice: &Invoice) -> bool {
        if let Some(status) = self.status {
            if invoice.status != status {
                return false;
            }
        }
        match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                let needle = query.to_lowercase();
                invoice.customer_name.to_lowercase().contains(&needle)
                    || invoice.invoice_number.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRow {
    pub id: String,
    pub customer_name: String,
    pub invoice_number: String,
    pub amount: f64,
    pub amount_display: String,
    pub due_date: String,
    pub status: InvoiceStatus,
    pub status_label: String,
    pub suggested_action: SuggestedAction,
}

impl From<&Invoice> for InvoiceRow {
    fn from(invoice: &Invoice) -> Self {
        InvoiceRow {
            id: invoice.id.clone(),
            customer_name: invoice.customer_name.clone(),
            invoice_number: invoice.invoice_number.clone(),
            amount: invoice.amount,
            amount_display: format_currency(invoice.amount),
            due_date: invoice.due_date.clone(),
            status: invoice.status,
            status_label: invoice.status.label().to_string(),
            suggested_action: invoice.suggested_action.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTable {
    pub rows: Vec<InvoiceRow>,
    pub total: usize,
    pub load: LoadState,
}

pub fn invoice_table(store: &AppStore, filter: &InvoiceFilter) -> InvoiceTable {
    let invoices = store.invoices();
    InvoiceTable {
        rows: invoices
            .iter()
            .filter(|invoice| filter.matches(invoice))
            .map(InvoiceRow::from)
            .collect(),
        total: invoices.len(),
        load: store.invoices_state.clone(),
    }
}
