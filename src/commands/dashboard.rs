use settleflow::services::state::AppState;
use settleflow::views::dashboard::{dashboard_snapshot, DashboardSnapshot};
use tauri::State;

#[tauri::command]
pub async fn get_dashboard(state: State<'_, AppState>) -> Result<DashboardSnapshot, String> {
    state.read(dashboard_snapshot).map_err(|e| e.to_string())
}
