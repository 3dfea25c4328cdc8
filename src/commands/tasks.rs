use chrono::Local;
use settleflow::models::{NewTask, Task, TaskStatus};
use settleflow::services::state::AppState;
use settleflow::views::tasks::{tasks_page, TasksPage};
use tauri::{AppHandle, State};

use crate::commands::notify_store_updated;

#[tauri::command]
pub async fn get_tasks(state: State<'_, AppState>) -> Result<TasksPage, String> {
    let now = Local::now();
    state
        .read(|store| tasks_page(store, &now))
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn fetch_tasks(state: State<'_, AppState>, app: AppHandle) -> Result<TasksPage, String> {
    state.refresh_tasks().await.map_err(|e| e.to_string())?;
    notify_store_updated(&app);
    get_tasks(state).await
}

#[tauri::command]
pub async fn add_task(payload: NewTask, state: State<'_, AppState>, app: AppHandle) -> Result<Task, String> {
    let task = state
        .update(|store| store.add_task(payload))
        .map_err(|e| e.to_string())?;
    notify_store_updated(&app);
    Ok(task)
}

#[tauri::command]
pub async fn toggle_task_status(task_id: String, state: State<'_, AppState>, app: AppHandle) -> Result<TaskStatus, String> {
    let status = state
        .update(|store| store.toggle_task_status(&task_id))
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "Task not found".to_string())?;
    notify_store_updated(&app);
    Ok(status)
}
