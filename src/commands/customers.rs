use settleflow::services::state::AppState;
use settleflow::views::customers::{customers_page, CustomersPage};
use tauri::{AppHandle, State};

use crate::commands::notify_store_updated;

#[tauri::command]
pub async fn get_customers(state: State<'_, AppState>) -> Result<CustomersPage, String> {
    state.read(customers_page).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn fetch_customers(state: State<'_, AppState>, app: AppHandle) -> Result<CustomersPage, String> {
    state.refresh_customers().await.map_err(|e| e.to_string())?;
    notify_store_updated(&app);
    state.read(customers_page).map_err(|e| e.to_string())
}
