//! File-selection Tauri commands (the upload screen's backing state).

use crate::app_state::AppState;
use crate::selection::{format_size_mb, AddOutcome};
use serde::Serialize;
use std::path::PathBuf;
use tauri::State;

/// One row of the selected-files list.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFileView {
    pub name: String,
    pub size_label: String,
}

#[tauri::command]
pub fn add_files(state: State<AppState>, paths: Vec<PathBuf>) -> Result<AddOutcome, String> {
    let mut selection = state
        .selection
        .write()
        .map_err(|_| "Failed to acquire selection lock".to_string())?;
    let outcome = selection.add_files(&paths);
    println!(
        "[Files] add_files: {} added, {} rejected, {} skipped",
        outcome.added.len(),
        outcome.rejected.len(),
        outcome.skipped.len()
    );
    Ok(outcome)
}

#[tauri::command]
pub fn remove_file(state: State<AppState>, name: String) -> Result<(), String> {
    let mut selection = state
        .selection
        .write()
        .map_err(|_| "Failed to acquire selection lock".to_string())?;
    selection.remove(&name);
    Ok(())
}

#[tauri::command]
pub fn get_selection(state: State<AppState>) -> Result<Vec<SelectedFileView>, String> {
    let selection = state
        .selection
        .read()
        .map_err(|_| "Failed to acquire selection lock".to_string())?;
    Ok(selection
        .files()
        .iter()
        .map(|f| SelectedFileView {
            name: f.name.clone(),
            size_label: format_size_mb(f.size_bytes),
        })
        .collect())
}
