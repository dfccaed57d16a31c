//! Session and analysis Tauri commands.

use crate::app_state::AppState;
use crate::client::AnalysisClient;
use crate::dashboard::DashboardView;
use crate::session::{self, SessionSnapshot};
use crate::settings;
use tauri::State;

/// Submit the current selection: extract, validate, analyze.
///
/// Runs to completion before returning; the frontend polls `get_session`
/// while this is in flight to show the phase label. Submitting an empty
/// selection changes nothing.
#[tauri::command]
pub async fn run_analysis(state: State<'_, AppState>) -> Result<SessionSnapshot, String> {
    let client = AnalysisClient::new(&settings::get_server_url());
    session::run_analysis(&state, &client).await?;
    get_session(state)
}

#[tauri::command]
pub fn get_session(state: State<'_, AppState>) -> Result<SessionSnapshot, String> {
    let session = state
        .session
        .read()
        .map_err(|_| "Failed to acquire session lock".to_string())?;
    Ok(SessionSnapshot::from(&*session))
}

/// Dashboard view model for the stored result.
#[tauri::command]
pub fn get_dashboard(state: State<'_, AppState>) -> Result<DashboardView, String> {
    let session = state
        .session
        .read()
        .map_err(|_| "Failed to acquire session lock".to_string())?;
    session
        .result
        .as_ref()
        .map(DashboardView::from_result)
        .ok_or_else(|| "No analysis result available".to_string())
}

/// Back to the upload screen: clears the result, the error, and the
/// file selection in one step.
#[tauri::command]
pub fn reset_session(state: State<'_, AppState>) -> Result<SessionSnapshot, String> {
    session::reset(&state)?;
    get_session(state)
}
