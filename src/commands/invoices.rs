use std::path::PathBuf;

use serde::Deserialize;
use settleflow::models::api::InvoiceAnalysis;
use settleflow::models::{Activity, Invoice, InvoiceStatus, Task};
use settleflow::services::state::AppState;
use settleflow::views::invoices::{invoice_table, InvoiceFilter, InvoiceTable};
use tauri::{AppHandle, State};

use crate::commands::notify_store_updated;

#[derive(Deserialize)]
pub struct UpdateStatusPayload {
    pub invoice_id: String,
    pub status: InvoiceStatus,
}

#[tauri::command]
pub async fn get_invoices(filter: Option<InvoiceFilter>, state: State<'_, AppState>) -> Result<InvoiceTable, String> {
    let filter = filter.unwrap_or_default();
    state
        .read(|store| invoice_table(store, &filter))
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn fetch_invoices(state: State<'_, AppState>, app: AppHandle) -> Result<InvoiceTable, String> {
    state.refresh_invoices().await.map_err(|e| e.to_string())?;
    notify_store_updated(&app);
    state
        .read(|store| invoice_table(store, &InvoiceFilter::default()))
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn upload_invoice(path: String, state: State<'_, AppState>, app: AppHandle) -> Result<Invoice, String> {
    let invoice = state
        .upload_invoice(&PathBuf::from(path))
        .await
        .map_err(|e| e.to_string())?;
    notify_store_updated(&app);
    Ok(invoice)
}

#[tauri::command]
pub async fn pick_invoice_file() -> Result<Option<String>, String> {
    let selection = rfd::FileDialog::new()
        .add_filter("Invoices", &["pdf", "png", "jpg", "jpeg"])
        .pick_file()
        .map(|path| path.to_string_lossy().to_string());
    Ok(selection)
}

#[tauri::command]
pub async fn analyze_invoice(invoice_id: String, state: State<'_, AppState>) -> Result<InvoiceAnalysis, String> {
    state
        .analyze_invoice(&invoice_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn update_invoice_status(
    payload: UpdateStatusPayload,
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<Option<Activity>, String> {
    let activity = state
        .update(|store| store.change_invoice_status(&payload.invoice_id, payload.status))
        .map_err(|e| e.to_string())?;
    notify_store_updated(&app);
    Ok(activity)
}

#[tauri::command]
pub async fn mark_invoice_paid(
    invoice_id: String,
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<Option<Activity>, String> {
    let activity = state
        .update(|store| store.mark_invoice_as_paid(&invoice_id))
        .map_err(|e| e.to_string())?;
    notify_store_updated(&app);
    Ok(activity)
}

#[tauri::command]
pub async fn send_invoice_email(invoice_id: String, state: State<'_, AppState>, app: AppHandle) -> Result<Activity, String> {
    let activity = state
        .update(|store| {
            let invoice = store.invoice(&invoice_id).cloned()?;
            Some(store.send_email_for_invoice(&invoice))
        })
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "Invoice not found".to_string())?;
    notify_store_updated(&app);
    Ok(activity)
}

#[tauri::command]
pub async fn simulate_customer_reply(invoice_id: String, state: State<'_, AppState>, app: AppHandle) -> Result<Task, String> {
    let task = state
        .update(|store| {
            let invoice = store.invoice(&invoice_id).cloned()?;
            Some(store.simulate_customer_reply(&invoice))
        })
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "Invoice not found".to_string())?;
    notify_store_updated(&app);
    Ok(task)
}
