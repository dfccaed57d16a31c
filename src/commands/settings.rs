//! Settings-related Tauri commands

use crate::settings;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerUrlStatus {
    pub url: String,
    pub source: String, // "env", "settings", or "default"
}

#[tauri::command]
pub fn get_server_url() -> ServerUrlStatus {
    let env_url = std::env::var("AUDITOR_SERVER_URL")
        .ok()
        .filter(|u| !u.is_empty());

    let url = settings::get_server_url();
    let source = if env_url.is_some() {
        "env"
    } else if url == settings::DEFAULT_SERVER_URL {
        "default"
    } else {
        "settings"
    };

    ServerUrlStatus {
        url,
        source: source.to_string(),
    }
}

#[tauri::command]
pub fn set_server_url(url: String) -> Result<(), String> {
    settings::set_server_url(url)
}
