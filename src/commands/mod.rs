pub mod activity;
pub mod customers;
pub mod dashboard;
pub mod emails;
pub mod invoices;
pub mod settings;
pub mod tasks;

use tauri::{AppHandle, Emitter};
use tracing::warn;

pub const STORE_UPDATED: &str = "store-updated";

/// Tells every window to re-read the views after a mutation.
pub fn notify_store_updated(app: &AppHandle) {
    if let Err(err) = app.emit(STORE_UPDATED, ()) {
        warn!(error = %err, "failed to emit store update");
    }
}
