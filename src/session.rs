//! Session state machine and the analysis pipeline.
//!
//! Two views: `Upload` (initial) and `Dashboard` (after a successful
//! analysis). `loading` and `error` are orthogonal flags, not views; the
//! loading overlay sits on top of whichever view is active, with a textual
//! phase label that is part of the observable contract:
//! "Processing N file(s)..." then "Auditing eligibility and technical
//! requirements...".
//!
//! The pipeline is strictly sequential: extract every file, validate the
//! combined text, then one analysis call. Any failure puts its message in
//! `error` and leaves the view on `Upload`; no partial dashboard is ever
//! shown.

use crate::app_state::AppState;
use crate::client::AnalysisClient;
use crate::error::AuditError;
use crate::extract;
use crate::models::AnalysisResult;
use crate::selection::SelectedFile;
use serde::Serialize;

/// Minimum combined text length for an analysis to be worth running.
pub const MIN_EXTRACTED_TEXT_CHARS: usize = 50;

pub const PHASE_AUDITING: &str = "Auditing eligibility and technical requirements...";

pub fn phase_processing(file_count: usize) -> String {
    format!("Processing {} file(s)...", file_count)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Upload,
    Dashboard,
}

#[derive(Debug)]
pub struct Session {
    pub view: View,
    pub loading: bool,
    pub phase: Option<String>,
    pub error: Option<String>,
    pub result: Option<AnalysisResult>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            view: View::Upload,
            loading: false,
            phase: None,
            error: None,
            result: None,
        }
    }
}

impl Session {
    /// Back to the upload screen, dropping the result and any error.
    pub fn reset(&mut self) {
        self.view = View::Upload;
        self.result = None;
        self.error = None;
    }
}

/// Full reset: session back to the upload view, selection emptied.
///
/// Works from any state; a reset issued while files are still selected
/// discards them along with the result and error.
pub fn reset(state: &AppState) -> Result<(), String> {
    state
        .session
        .write()
        .map_err(|_| "Failed to acquire session lock".to_string())?
        .reset();
    state
        .selection
        .write()
        .map_err(|_| "Failed to acquire selection lock".to_string())?
        .clear();
    Ok(())
}

/// Serialized session view for the frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub view: View,
    pub loading: bool,
    pub phase: Option<String>,
    pub error: Option<String>,
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        Self {
            view: session.view,
            loading: session.loading,
            phase: session.phase.clone(),
            error: session.error.clone(),
        }
    }
}

/// Run the full submission pipeline for the current selection.
///
/// Submitting an empty selection is a no-op: no state changes at all. On
/// success the selection is cleared and the view switches to the dashboard;
/// on any failure the view stays on upload with the error message stored.
pub async fn run_analysis(state: &AppState, client: &AnalysisClient) -> Result<(), String> {
    let files: Vec<SelectedFile> = state
        .selection
        .read()
        .map_err(|_| "Failed to acquire selection lock".to_string())?
        .files()
        .to_vec();
    if files.is_empty() {
        return Ok(());
    }

    {
        let mut session = lock_session(state)?;
        session.loading = true;
        session.error = None;
        session.phase = Some(phase_processing(files.len()));
    }
    println!("[Audit] Starting analysis of {} file(s)", files.len());

    let outcome = run_pipeline(state, &files, client).await;

    let mut session = lock_session(state)?;
    match outcome {
        Ok(result) => {
            println!(
                "[Audit] Analysis complete: {} item(s), process {}",
                result.items.len(),
                result.metadata.number
            );
            session.result = Some(result);
            session.view = View::Dashboard;
            if let Ok(mut selection) = state.selection.write() {
                selection.clear();
            }
        }
        Err(e) => {
            eprintln!("[Audit] Analysis failed: {}", e);
            session.error = Some(e.to_string());
        }
    }
    session.loading = false;
    session.phase = None;
    Ok(())
}

fn lock_session(state: &AppState) -> Result<std::sync::RwLockWriteGuard<'_, Session>, String> {
    state
        .session
        .write()
        .map_err(|_| "Failed to acquire session lock".to_string())
}

async fn run_pipeline(
    state: &AppState,
    files: &[SelectedFile],
    client: &AnalysisClient,
) -> Result<AnalysisResult, AuditError> {
    let text = extract::extract_text_from_files(files)?;

    let filenames = files
        .iter()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    analyze_extracted(state, &filenames, &text, client).await
}

/// Validate the combined text, then hand it to the analysis client.
///
/// Split out from extraction so the length gate is checked before any
/// request leaves the machine.
async fn analyze_extracted(
    state: &AppState,
    filenames: &str,
    text: &str,
    client: &AnalysisClient,
) -> Result<AnalysisResult, AuditError> {
    if text.chars().count() < MIN_EXTRACTED_TEXT_CHARS {
        return Err(AuditError::InsufficientText);
    }

    if let Ok(mut session) = state.session.write() {
        session.phase = Some(PHASE_AUDITING.to_string());
    }

    client.analyze(filenames, text).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::minimal_pdf;
    use crate::models::sample_result_json;
    use std::path::PathBuf;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn mock_server(status: u16, body: String) -> (String, mpsc::Receiver<String>) {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            if let Ok(mut request) = server.recv() {
                let mut received = String::new();
                let _ = request.as_reader().read_to_string(&mut received);
                let _ = tx.send(received);
                let _ = request.respond(
                    tiny_http::Response::from_string(body).with_status_code(status),
                );
            }
        });
        (format!("http://{}", addr), rx)
    }

    fn state_with_pdfs(dir: &TempDir, names: &[&str]) -> AppState {
        let state = AppState::new();
        let mut paths = Vec::new();
        for name in names {
            let path = dir.path().join(name);
            std::fs::write(&path, minimal_pdf("Edital de Pregao Eletronico, objeto e condicoes")).unwrap();
            paths.push(path);
        }
        let outcome = state.selection.write().unwrap().add_files(&paths);
        assert_eq!(outcome.added.len(), names.len());
        state
    }

    #[tokio::test]
    async fn test_empty_selection_is_a_noop() {
        let state = AppState::new();
        let client = AnalysisClient::new("http://127.0.0.1:9");

        run_analysis(&state, &client).await.unwrap();

        let session = state.session.read().unwrap();
        assert_eq!(session.view, View::Upload);
        assert!(!session.loading);
        assert!(session.error.is_none());
        assert!(session.result.is_none());
    }

    #[tokio::test]
    async fn test_success_switches_to_dashboard_and_clears_selection() {
        let dir = TempDir::new().unwrap();
        let state = state_with_pdfs(&dir, &["edital.pdf", "tr.pdf"]);
        let (url, rx) = mock_server(200, sample_result_json().to_string());
        let client = AnalysisClient::new(&url);

        run_analysis(&state, &client).await.unwrap();

        let session = state.session.read().unwrap();
        assert_eq!(session.view, View::Dashboard);
        assert!(!session.loading);
        assert!(session.phase.is_none());
        assert!(session.error.is_none());
        assert!(session.result.is_some());
        assert!(state.selection.read().unwrap().is_empty());

        // The request carried the comma-joined names and the marked-up text
        let sent: serde_json::Value = serde_json::from_str(&rx.recv().unwrap()).unwrap();
        assert_eq!(sent["filenames"], "edital.pdf, tr.pdf");
        let text = sent["text"].as_str().unwrap();
        assert!(text.contains("<<< BEGIN FILE: edital.pdf >>>"));
        assert!(text.contains("<<< END FILE: tr.pdf >>>"));
    }

    #[tokio::test]
    async fn test_server_error_keeps_upload_view_with_detail_message() {
        let dir = TempDir::new().unwrap();
        let state = state_with_pdfs(&dir, &["edital.pdf"]);
        let (url, _rx) = mock_server(500, r#"{"detail":"bad text"}"#.to_string());
        let client = AnalysisClient::new(&url);

        run_analysis(&state, &client).await.unwrap();

        let session = state.session.read().unwrap();
        assert_eq!(session.view, View::Upload);
        assert_eq!(session.error.as_deref(), Some("bad text"));
        assert!(session.result.is_none());
        assert!(!session.loading);
        // Failed submissions keep the selection for another attempt
        assert_eq!(state.selection.read().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_file_aborts_before_any_request() {
        let dir = TempDir::new().unwrap();
        let state = AppState::new();
        let path = dir.path().join("corrompido.pdf");
        std::fs::write(&path, b"garbage bytes").unwrap();
        state.selection.write().unwrap().add_files(&[path]);

        let (url, rx) = mock_server(200, sample_result_json().to_string());
        let client = AnalysisClient::new(&url);

        run_analysis(&state, &client).await.unwrap();

        let session = state.session.read().unwrap();
        assert_eq!(session.view, View::Upload);
        assert!(session.error.as_deref().unwrap().contains("corrompido.pdf"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_short_text_reports_insufficiency_without_calling_server() {
        let state = AppState::new();
        let (url, rx) = mock_server(200, sample_result_json().to_string());
        let client = AnalysisClient::new(&url);

        let text_49: String = "x".repeat(49);
        let err = analyze_extracted(&state, "a.pdf", &text_49, &client)
            .await
            .unwrap_err();

        assert!(matches!(err, AuditError::InsufficientText));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_50_chars_is_enough_to_reach_the_server() {
        let state = AppState::new();
        let (url, rx) = mock_server(200, sample_result_json().to_string());
        let client = AnalysisClient::new(&url);

        let text_50: String = "x".repeat(50);
        analyze_extracted(&state, "a.pdf", &text_50, &client)
            .await
            .unwrap();
        assert!(rx.recv().is_ok());
        assert_eq!(
            state.session.read().unwrap().phase.as_deref(),
            Some(PHASE_AUDITING)
        );
    }

    #[test]
    fn test_reset_returns_to_upload_clearing_result_and_error() {
        let mut session = Session {
            view: View::Dashboard,
            loading: false,
            phase: None,
            error: Some("old error".to_string()),
            result: serde_json::from_value(sample_result_json()).ok(),
        };
        session.reset();
        assert_eq!(session.view, View::Upload);
        assert!(session.result.is_none());
        assert!(session.error.is_none());
    }

    #[test]
    fn test_reset_also_empties_the_selection() {
        let dir = TempDir::new().unwrap();
        let state = state_with_pdfs(&dir, &["edital.pdf"]);
        {
            let mut session = state.session.write().unwrap();
            session.view = View::Dashboard;
            session.error = Some("old error".to_string());
        }

        reset(&state).unwrap();

        assert!(state.selection.read().unwrap().is_empty());
        let session = state.session.read().unwrap();
        assert_eq!(session.view, View::Upload);
        assert!(session.result.is_none());
        assert!(session.error.is_none());
    }

    #[test]
    fn test_phase_labels() {
        assert_eq!(phase_processing(3), "Processing 3 file(s)...");
        assert_eq!(
            PHASE_AUDITING,
            "Auditing eligibility and technical requirements..."
        );
    }

    #[test]
    fn test_snapshot_serializes_view_lowercase() {
        let snapshot = SessionSnapshot::from(&Session::default());
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["view"], "upload");
        assert_eq!(json["loading"], false);
    }

    #[test]
    fn test_file_read_error_mentions_name() {
        let missing = crate::selection::SelectedFile {
            name: "faltando.pdf".to_string(),
            path: PathBuf::from("/nope/faltando.pdf"),
            size_bytes: 0,
        };
        let err = extract::extract_text_from_files(&[missing]).unwrap_err();
        assert!(err.to_string().contains("faltando.pdf"));
    }
}
