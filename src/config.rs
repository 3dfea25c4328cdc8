use std::env;

use tracing_subscriber::{fmt, EnvFilter};

use crate::models::Settings;

pub const DEFAULT_API_BASE_URL: &str = "http://10.4.144.243:5000";
pub const DEFAULT_EMAIL_WEBHOOK_URL: &str = "https://cdc9cd9a6e2d.ngrok-free.app/gmail/webhook";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const API_URL_VAR: &str = "SETTLEFLOW_API_URL";
const WEBHOOK_URL_VAR: &str = "SETTLEFLOW_EMAIL_WEBHOOK_URL";
const TIMEOUT_VAR: &str = "SETTLEFLOW_REQUEST_TIMEOUT_SECS";

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            email_webhook_url: DEFAULT_EMAIL_WEBHOOK_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

pub fn load_settings() -> Settings {
    settings_from(|key| env::var(key).ok())
}

/// Builds settings from a variable lookup, falling back to defaults for
/// missing, blank or unparseable values.
pub fn settings_from<F>(lookup: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let defaults = Settings::default();
    Settings {
        api_base_url: non_empty(API_URL_VAR)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url),
        email_webhook_url: non_empty(WEBHOOK_URL_VAR).unwrap_or(defaults.email_webhook_url),
        request_timeout_secs: non_empty(TIMEOUT_VAR)
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults.request_timeout_secs),
    }
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
