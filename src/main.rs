#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod commands;

use tauri::Manager;
use tracing::{info, warn};

use settleflow::config::{init_tracing, load_settings};
use settleflow::services::state::AppState;

fn main() {
    init_tracing();

    tauri::Builder::default()
        .setup(|app| {
            let settings = load_settings();
            info!(api = %settings.api_base_url, "starting settleflow");
            let state = AppState::new(settings)?;
            app.manage(state);

            let handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                load_initial_data(&handle).await;
            });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::dashboard::get_dashboard,
            commands::invoices::get_invoices,
            commands::invoices::fetch_invoices,
            commands::invoices::upload_invoice,
            commands::invoices::pick_invoice_file,
            commands::invoices::analyze_invoice,
            commands::invoices::update_invoice_status,
            commands::invoices::mark_invoice_paid,
            commands::invoices::send_invoice_email,
            commands::invoices::simulate_customer_reply,
            commands::customers::get_customers,
            commands::customers::fetch_customers,
            commands::tasks::get_tasks,
            commands::tasks::fetch_tasks,
            commands::tasks::add_task,
            commands::tasks::toggle_task_status,
            commands::activity::get_activity_feed,
            commands::activity::add_activity,
            commands::emails::get_sample_emails,
            commands::emails::send_customer_email,
            commands::settings::get_settings,
            commands::settings::save_settings,
            commands::settings::test_backend_connection,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

async fn load_initial_data(app: &tauri::AppHandle) {
    let state = app.state::<AppState>();
    if let Err(err) = state.refresh_invoices().await {
        warn!(error = %err, "initial invoice load failed");
    }
    if let Err(err) = state.refresh_customers().await {
        warn!(error = %err, "initial customer load failed");
    }
    if let Err(err) = state.refresh_tasks().await {
        warn!(error = %err, "initial task load failed");
    }
    commands::notify_store_updated(app);
}
