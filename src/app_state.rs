//! Shared application state managed by Tauri.
//!
//! Two independent pieces behind their own locks: the upload screen's file
//! selection and the session (view, loading, error, result). There is one
//! logical thread of user-driven mutation; the locks only guard against a
//! second command arriving while an analysis is in flight, since the UI does
//! not disable input during loading.

use crate::selection::Selection;
use crate::session::Session;
use std::sync::RwLock;

#[derive(Default)]
pub struct AppState {
    pub selection: RwLock<Selection>,
    pub session: RwLock<Session>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
