//! Error taxonomy for the audit pipeline.
//!
//! The Display strings double as the user-facing messages: the session only
//! ever stores `to_string()` of whatever failed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Failed to read file {name}: {source}")]
    FileRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {name}. Make sure it is a valid PDF file.")]
    InvalidPdf { name: String, detail: String },

    #[error("Could not extract enough text. Make sure the files are searchable PDFs.")]
    InsufficientText,

    #[error("Failed to reach the analysis server. Please try again.")]
    Transport { detail: String },

    /// Non-2xx response. When the server supplied a `detail` field it is
    /// surfaced verbatim; otherwise a generic status message.
    #[error("{}", server_message(.status, .detail))]
    Server {
        status: u16,
        detail: Option<String>,
    },
}

fn server_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(d) => d.clone(),
        None => format!("Server error: {}", status),
    }
}
