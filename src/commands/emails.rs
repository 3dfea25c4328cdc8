use settleflow::models::SampleEmail;
use settleflow::services::seed::sample_emails;
use settleflow::services::state::AppState;
use tauri::State;

#[tauri::command]
pub async fn get_sample_emails() -> Result<Vec<SampleEmail>, String> {
    Ok(sample_emails())
}

#[tauri::command]
pub async fn send_customer_email(email_id: String, state: State<'_, AppState>) -> Result<(), String> {
    state
        .send_customer_email(&email_id)
        .await
        .map_err(|e| e.to_string())
}
