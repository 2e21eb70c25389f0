// crates/locale-gate-loader/src/loader.rs
// ============================================================================
// Module: Catalog Loader
// Description: Async materialization of locale tables from a locales root.
// Purpose: Fail-closed loading with discovery and atomic hot reload.
// Dependencies: locale-gate-core, thiserror, tokio, tracing
// ============================================================================

//! ## Overview
//! One JSON document per language lives under the locales root
//! (`<root>/en.json`, `<root>/zh.json`). Loading reads and flattens each
//! requested document; a missing file or malformed document fails that load
//! call, while key-set parity divergence never does (it is reported by
//! [`locale_gate_core::Catalog::check_parity`], and resolution falls back
//! per key).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use locale_gate_core::Catalog;
use locale_gate_core::CatalogError;
use locale_gate_core::CatalogHandle;
use locale_gate_core::LanguageTag;
use locale_gate_core::LocaleTable;
use thiserror::Error;
use tracing::info;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted locale document size in bytes.
pub(crate) const MAX_LOCALE_FILE_SIZE: u64 = 1024 * 1024;

/// Extension carried by locale documents.
const LOCALE_FILE_EXTENSION: &str = "json";

// ============================================================================
// SECTION: Loader
// ============================================================================

/// Reads locale documents from a root directory into catalogs.
///
/// # Invariants
/// - Never mutates a [`CatalogHandle`] until a full replacement catalog has
///   been built; a cancelled load leaves the previous catalog active.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    /// Directory holding one `<tag>.json` per language.
    root: PathBuf,
    /// Default (fallback, source-of-truth) language.
    default_language: LanguageTag,
}

impl CatalogLoader {
    /// Creates a loader over `root` with `default_language` as the fallback
    /// target.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, default_language: LanguageTag) -> Self {
        Self {
            root: root.into(),
            default_language,
        }
    }

    /// Returns the locales root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads the requested languages into a catalog.
    ///
    /// The default language is always loaded, whether or not it appears in
    /// `languages`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingLanguage`] when a requested language has
    /// no document, [`LoadError::Catalog`] when a document is malformed, and
    /// [`LoadError::Io`] for other filesystem failures.
    pub async fn load(&self, languages: &[LanguageTag]) -> Result<Catalog, LoadError> {
        let mut tags: Vec<LanguageTag> = Vec::with_capacity(languages.len() + 1);
        tags.push(self.default_language.clone());
        for tag in languages {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }

        let mut tables = Vec::with_capacity(tags.len());
        for tag in &tags {
            tables.push(self.load_table(tag).await?);
        }
        let catalog = Catalog::from_tables(self.default_language.clone(), tables)?;
        info!(
            root = %self.root.display(),
            languages = tags.len(),
            "loaded locale catalog"
        );
        Ok(catalog)
    }

    /// Discovers languages from `<root>/*.json` and loads them all.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] when the root cannot be listed,
    /// [`LoadError::MissingLanguage`] when no document exists for the
    /// default language, and the usual per-document errors otherwise.
    pub async fn load_discovered(&self) -> Result<Catalog, LoadError> {
        let mut languages = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|err| LoadError::Io(format!("{}: {err}", self.root.display())))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| LoadError::Io(format!("{}: {err}", self.root.display())))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(LOCALE_FILE_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match LanguageTag::parse(stem) {
                Ok(tag) => languages.push(tag),
                Err(err) => {
                    return Err(LoadError::Io(format!(
                        "locale file '{}' has an invalid language name: {err}",
                        path.display()
                    )));
                }
            }
        }
        self.load(&languages).await
    }

    /// Loads a fresh catalog and swaps it into `handle`.
    ///
    /// The swap happens only after the whole catalog is built, so readers
    /// observe either the previous catalog or the new one in full, and a
    /// cancellation before completion changes nothing.
    ///
    /// # Errors
    ///
    /// Propagates the same errors as [`CatalogLoader::load`]; on error the
    /// handle is untouched.
    pub async fn reload_into(
        &self,
        handle: &CatalogHandle,
        languages: &[LanguageTag],
    ) -> Result<Arc<Catalog>, LoadError> {
        let catalog = self.load(languages).await?;
        handle.replace(catalog);
        Ok(handle.current())
    }

    /// Reads and flattens one language's document.
    async fn load_table(&self, language: &LanguageTag) -> Result<LocaleTable, LoadError> {
        let path = self.document_path(language);
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::MissingLanguage {
                    language: language.clone(),
                    path: path.display().to_string(),
                });
            }
            Err(err) => return Err(LoadError::Io(format!("{}: {err}", path.display()))),
        };
        if metadata.len() > MAX_LOCALE_FILE_SIZE {
            return Err(LoadError::Io(format!(
                "{}: locale document exceeds {MAX_LOCALE_FILE_SIZE} bytes ({})",
                path.display(),
                metadata.len()
            )));
        }
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| LoadError::Io(format!("{}: {err}", path.display())))?;
        Ok(LocaleTable::from_json_str(language.clone(), &text)?)
    }

    /// Path of the document backing `language`.
    fn document_path(&self, language: &LanguageTag) -> PathBuf {
        self.root.join(format!("{language}.{LOCALE_FILE_EXTENSION}"))
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Filesystem failure while reading locale documents.
    #[error("locale io error: {0}")]
    Io(String),
    /// A requested language has no backing document.
    #[error("no locale document for language '{language}' at {path}")]
    MissingLanguage {
        /// Language with no document.
        language: LanguageTag,
        /// Path that was probed.
        path: String,
    },
    /// A document parsed but was not a valid nested string tree, or the
    /// default table was absent from the assembled set.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
