//! Application settings storage
//!
//! Stores the analysis server URL in a JSON file in the app data directory.
//! The `AUDITOR_SERVER_URL` environment variable takes precedence over the
//! stored value.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

/// Global settings instance
static SETTINGS: RwLock<Option<Settings>> = RwLock::new(None);

/// Path to config file (set during init)
static CONFIG_PATH: RwLock<Option<PathBuf>> = RwLock::new(None);

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_server_url")]
    pub analysis_server_url: String,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            analysis_server_url: default_server_url(),
        }
    }
}

impl Settings {
    /// Load settings from disk or create default
    fn load(path: &PathBuf) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => Settings::default(),
            }
        } else {
            Settings::default()
        }
    }

    /// Save settings to disk
    fn save(&self, path: &PathBuf) -> Result<(), String> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(path, content).map_err(|e| format!("Failed to write settings: {}", e))?;

        Ok(())
    }
}

/// Initialize settings with the app data directory
pub fn init(app_data_dir: PathBuf) {
    let config_path = app_data_dir.join("settings.json");
    let settings = Settings::load(&config_path);

    *CONFIG_PATH.write().unwrap() = Some(config_path);
    *SETTINGS.write().unwrap() = Some(settings);
}

/// Fallback data directory when running outside a Tauri context.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bidauditor")
}

/// Get the analysis server base URL (env var first, then stored setting)
pub fn get_server_url() -> String {
    if let Ok(url) = std::env::var("AUDITOR_SERVER_URL") {
        if !url.is_empty() {
            return url;
        }
    }

    let guard = SETTINGS.read().ok();
    guard
        .as_ref()
        .and_then(|g| g.as_ref())
        .map(|s| s.analysis_server_url.clone())
        .unwrap_or_else(default_server_url)
}

/// Set and save the analysis server URL
pub fn set_server_url(url: String) -> Result<(), String> {
    validate_server_url(&url)?;

    let mut settings_guard = SETTINGS
        .write()
        .map_err(|_| "Failed to acquire settings lock")?;

    let settings = settings_guard.get_or_insert_with(Settings::default);
    settings.analysis_server_url = url;

    let config_path = CONFIG_PATH
        .read()
        .map_err(|_| "Failed to acquire config path lock")?
        .clone()
        .ok_or("Settings not initialized")?;

    settings.save(&config_path)?;

    println!("[Settings] Analysis server URL saved");
    Ok(())
}

fn validate_server_url(raw: &str) -> Result<(), String> {
    let parsed = url::Url::parse(raw).map_err(|e| format!("Invalid server URL: {}", e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("Unsupported URL scheme: {}", other)),
    }
}
