use std::collections::HashMap;
use std::fs;

use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const SETTINGS_FILE: &str = "client.toml";
const KEYS: [&str; 2] = ["api_base_url", "request_timeout_secs"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Defaults, then `client.toml` in the working directory, then environment
/// variables (`API_BASE_URL` or the `APP__`-prefixed form). Invalid values
/// are logged and skipped rather than failing startup.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_values) => apply(&mut settings, &file_values),
            Err(err) => warn!("settings: ignoring unreadable {SETTINGS_FILE}: {err}"),
        }
    }

    let mut env_values = HashMap::new();
    for key in KEYS {
        let bare = key.to_uppercase();
        for name in [bare.clone(), format!("APP__{bare}")] {
            if let Ok(value) = std::env::var(&name) {
                env_values.insert(key.to_string(), value);
            }
        }
    }
    apply(&mut settings, &env_values);

    settings
}

fn apply(settings: &mut Settings, values: &HashMap<String, String>) {
    if let Some(value) = values.get("api_base_url") {
        match normalize_base_url(value) {
            Some(url) => settings.api_base_url = url,
            None => warn!("settings: ignoring invalid api_base_url '{value}'"),
        }
    }
    if let Some(value) = values.get("request_timeout_secs") {
        match value.parse::<u64>() {
            Ok(secs) if secs > 0 => settings.request_timeout_secs = secs,
            _ => warn!("settings: ignoring invalid request_timeout_secs '{value}'"),
        }
    }
}

fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).ok()?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return None;
    }
    Some(trimmed.trim_end_matches('/').to_string())
}
