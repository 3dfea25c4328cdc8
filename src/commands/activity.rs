use chrono::Local;
use settleflow::models::{Activity, NewActivity};
use settleflow::services::state::AppState;
use settleflow::views::activity::{activity_feed, ActivityGroup};
use tauri::{AppHandle, State};

use crate::commands::notify_store_updated;

#[tauri::command]
pub async fn get_activity_feed(state: State<'_, AppState>) -> Result<Vec<ActivityGroup>, String> {
    let now = Local::now();
    state
        .read(|store| activity_feed(store.activities(), &now))
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn add_activity(payload: NewActivity, state: State<'_, AppState>, app: AppHandle) -> Result<Activity, String> {
    let activity = state
        .update(|store| store.add_activity(payload))
        .map_err(|e| e.to_string())?;
    notify_store_updated(&app);
    Ok(activity)
}
