//! The upload screen's working set of files.
//!
//! An ordered, filename-unique list. Non-PDF picks are rejected (reported by
//! name in the outcome rather than a blocking dialog) and duplicates are
//! skipped, first-seen wins. Cleared on successful submission or reset.

use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// What happened to a batch of picked paths.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddOutcome {
    /// Filenames merged into the selection by this call.
    pub added: Vec<String>,
    /// Filenames dropped because they are not PDFs.
    pub rejected: Vec<String>,
    /// Filenames skipped because the name was already selected.
    pub skipped: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Selection {
    files: Vec<SelectedFile>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge picked paths into the selection.
    ///
    /// Anything without a `.pdf` extension (case-insensitive) is rejected.
    /// A path whose filename is already in the selection is skipped, so the
    /// first-seen entry wins.
    pub fn add_files(&mut self, paths: &[PathBuf]) -> AddOutcome {
        let mut outcome = AddOutcome::default();

        for path in paths {
            let name = match path.file_name() {
                Some(n) => n.to_string_lossy().to_string(),
                None => continue,
            };

            if !is_pdf(path) {
                outcome.rejected.push(name);
                continue;
            }
            if self.contains(&name) {
                outcome.skipped.push(name);
                continue;
            }

            let size_bytes = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            outcome.added.push(name.clone());
            self.files.push(SelectedFile {
                name,
                path: path.clone(),
                size_bytes,
            });
        }

        outcome
    }

    pub fn remove(&mut self, name: &str) {
        self.files.retain(|f| f.name != name);
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.iter().any(|f| f.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Files in the order they were added.
    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    /// Comma-joined filenames, sent alongside the text for citation context.
    pub fn joined_names(&self) -> String {
        self.files
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Human-readable size for the selected-files list, e.g. "2.41 MB".
pub fn format_size_mb(size_bytes: u64) -> String {
    format!("{:.2} MB", size_bytes as f64 / 1024.0 / 1024.0)
}
