pub mod app_state;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod models;
pub mod selection;
pub mod session;
pub mod settings;
pub mod utils;

#[cfg(feature = "gui")]
mod commands;

#[cfg(feature = "gui")]
use app_state::AppState;

#[cfg(feature = "gui")]
use commands::{
    // File selection (upload screen)
    add_files, remove_file, get_selection,
    // Session and analysis
    run_analysis, get_session, get_dashboard, reset_session,
    // Settings
    get_server_url, set_server_url,
};

#[cfg(feature = "gui")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            // App data directory for settings
            let app_data_dir = app
                .path()
                .app_data_dir()
                .unwrap_or_else(|_| settings::default_data_dir());
            std::fs::create_dir_all(&app_data_dir).ok();

            settings::init(app_data_dir);
            app.manage(AppState::new());

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            add_files,
            remove_file,
            get_selection,
            run_analysis,
            get_session,
            get_dashboard,
            reset_session,
            get_server_url,
            set_server_url,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
