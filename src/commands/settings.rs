use serde::Deserialize;
use settleflow::models::Settings;
use settleflow::services::state::AppState;
use tauri::State;

#[derive(Deserialize)]
pub struct SettingsPayload {
    pub api_base_url: Option<String>,
    pub email_webhook_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[tauri::command]
pub async fn get_settings(state: State<'_, AppState>) -> Result<Settings, String> {
    state.settings().map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn save_settings(payload: SettingsPayload, state: State<'_, AppState>) -> Result<Settings, String> {
    let mut settings = state.settings().map_err(|e| e.to_string())?;

    if let Some(value) = payload.api_base_url {
        if !value.trim().is_empty() {
            settings.api_base_url = value.trim().trim_end_matches('/').to_string();
        }
    }
    if let Some(value) = payload.email_webhook_url {
        if !value.trim().is_empty() {
            settings.email_webhook_url = value.trim().to_string();
        }
    }
    if let Some(secs) = payload.request_timeout_secs.filter(|secs| *secs > 0) {
        settings.request_timeout_secs = secs;
    }

    state
        .update_settings(settings.clone())
        .map_err(|e| e.to_string())?;
    Ok(settings)
}

#[tauri::command]
pub async fn test_backend_connection(state: State<'_, AppState>) -> Result<bool, String> {
    state
        .test_backend_connection()
        .await
        .map_err(|e| format!("Connection failed: {}", e))
}
