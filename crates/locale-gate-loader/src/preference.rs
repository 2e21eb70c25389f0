// crates/locale-gate-loader/src/preference.rs
// ============================================================================
// Module: File Preference Store
// Description: JSON-document persistence of the user's locale preference.
// Purpose: Carry the selected language across sessions.
// Dependencies: locale-gate-core, serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! The preference is a tiny JSON document (`{"locale":"zh"}`) at a
//! host-chosen path. Reads are forgiving: a missing, unreadable, or invalid
//! document simply yields no preference and the notifier falls back to the
//! catalog default. Writes go through a temp file and rename so a crash
//! mid-write never leaves a truncated document.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::PathBuf;

use locale_gate_core::LanguageTag;
use locale_gate_core::PreferenceError;
use locale_gate_core::PreferenceStore;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

// ============================================================================
// SECTION: Document
// ============================================================================

/// Persisted preference document shape.
#[derive(Debug, Serialize, Deserialize)]
struct PreferenceDocument {
    /// Selected language tag.
    locale: LanguageTag,
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// File-backed [`PreferenceStore`].
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    /// Path of the preference document.
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Creates a store over `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Option<LanguageTag> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "no readable locale preference");
                return None;
            }
        };
        match serde_json::from_str::<PreferenceDocument>(&text) {
            Ok(document) => Some(document.locale),
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "ignoring invalid preference");
                None
            }
        }
    }

    fn save(&self, language: &LanguageTag) -> Result<(), PreferenceError> {
        let document = PreferenceDocument {
            locale: language.clone(),
        };
        let text = serde_json::to_string(&document)
            .map_err(|err| PreferenceError(format!("serialize preference: {err}")))?;
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, text)
            .map_err(|err| PreferenceError(format!("{}: {err}", temp_path.display())))?;
        fs::rename(&temp_path, &self.path)
            .map_err(|err| PreferenceError(format!("{}: {err}", self.path.display())))?;
        Ok(())
    }
}
