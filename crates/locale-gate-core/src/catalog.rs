// crates/locale-gate-core/src/catalog.rs
// ============================================================================
// Module: Localization Catalog
// Description: Loaded locale tables, parity checking, and the shared handle.
// Purpose: Own per-language tables and enforce the key-set parity contract.
// Dependencies: crate::{identifiers, table}, serde, thiserror
// ============================================================================

//! ## Overview
//! A [`Catalog`] owns one [`LocaleTable`] per loaded language plus the
//! default language tag used as the fallback target and parity reference.
//! Parity divergence between tables is a data condition, not a runtime
//! failure: [`Catalog::check_parity`] reports issues and resolution falls
//! back per key.
//!
//! [`CatalogHandle`] is the shared read path: readers take an `Arc` snapshot
//! and a reload replaces the whole catalog in one swap, so a reader observes
//! either the fully-old or fully-new catalog, never a mix.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::identifiers::KeyPath;
use crate::identifiers::LanguageTag;
use crate::table::LocaleTable;

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// All loaded locale tables plus the default language tag.
///
/// # Invariants
/// - The default language always has a table; it is the source of truth for
///   the key set and the fallback target for resolution.
/// - Tables are keyed by their own language tag.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Table for the default language; owned directly so the invariant that
    /// it exists holds by construction.
    default_table: LocaleTable,
    /// Non-default tables keyed by language tag.
    other_tables: BTreeMap<LanguageTag, LocaleTable>,
}

impl Catalog {
    /// Builds a catalog from loaded tables.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingLanguage`] when no table carries the
    /// default language tag.
    pub fn from_tables(
        default_language: LanguageTag,
        tables: Vec<LocaleTable>,
    ) -> Result<Self, CatalogError> {
        let mut default_table = None;
        let mut other_tables = BTreeMap::new();
        for table in tables {
            if table.language() == &default_language {
                default_table = Some(table);
            } else {
                other_tables.insert(table.language().clone(), table);
            }
        }
        let Some(default_table) = default_table else {
            return Err(CatalogError::MissingLanguage {
                language: default_language,
            });
        };
        Ok(Self {
            default_table,
            other_tables,
        })
    }

    /// Returns the table for `language` when loaded.
    #[must_use]
    pub fn table(&self, language: &LanguageTag) -> Option<&LocaleTable> {
        if language == self.default_language() {
            return Some(&self.default_table);
        }
        self.other_tables.get(language)
    }

    /// Returns the default language's table.
    #[must_use]
    pub const fn default_table(&self) -> &LocaleTable {
        &self.default_table
    }

    /// Returns the default (fallback) language tag.
    #[must_use]
    pub const fn default_language(&self) -> &LanguageTag {
        self.default_table.language()
    }

    /// Returns all loaded language tags in sorted order.
    #[must_use]
    pub fn languages(&self) -> Vec<&LanguageTag> {
        let mut tags: Vec<&LanguageTag> = self.other_tables.keys().collect();
        tags.push(self.default_language());
        tags.sort_unstable();
        tags
    }

    /// Whether `language` has a loaded table.
    #[must_use]
    pub fn contains_language(&self, language: &LanguageTag) -> bool {
        language == self.default_language() || self.other_tables.contains_key(language)
    }

    /// Diffs every non-default table's leaf key set against the default's.
    ///
    /// Returns one issue per divergent key, ordered by language, with
    /// missing keys before extra keys and each group sorted by key path. An
    /// empty result means every table exposes exactly the default table's
    /// key set.
    #[must_use]
    pub fn check_parity(&self) -> Vec<ParityIssue> {
        let reference: BTreeSet<&KeyPath> = self.default_table.leaf_keys().collect();
        let mut issues = Vec::new();
        for (language, table) in &self.other_tables {
            let keys: BTreeSet<&KeyPath> = table.leaf_keys().collect();
            for missing in reference.difference(&keys) {
                issues.push(ParityIssue {
                    language: language.clone(),
                    key: (*missing).clone(),
                    kind: ParityIssueKind::Missing,
                });
            }
            for extra in keys.difference(&reference) {
                issues.push(ParityIssue {
                    language: language.clone(),
                    key: (*extra).clone(),
                    kind: ParityIssueKind::Extra,
                });
            }
        }
        issues
    }
}

// ============================================================================
// SECTION: Parity Issues
// ============================================================================

/// How a locale table's key set diverges from the default table.
///
/// # Invariants
/// - Variants are stable for serialization in CI reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParityIssueKind {
    /// The default table has the key; this language lacks it.
    Missing,
    /// This language has a key the default table lacks.
    Extra,
}

/// One key-set divergence between a locale table and the default table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityIssue {
    /// Language whose table diverges.
    pub language: LanguageTag,
    /// Key path present on only one side.
    pub key: KeyPath,
    /// Direction of the divergence.
    pub kind: ParityIssueKind,
}

// ============================================================================
// SECTION: Shared Handle
// ============================================================================

/// Cloneable shared handle over the active catalog.
///
/// # Invariants
/// - Readers receive an `Arc` snapshot; [`CatalogHandle::replace`] is the
///   only mutation and swaps the whole catalog atomically.
#[derive(Debug, Clone)]
pub struct CatalogHandle {
    /// Current catalog, replaced wholesale on reload.
    inner: Arc<RwLock<Arc<Catalog>>>,
}

impl CatalogHandle {
    /// Wraps an initial catalog in a shared handle.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// Returns a snapshot of the current catalog.
    #[must_use]
    pub fn current(&self) -> Arc<Catalog> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replaces the catalog wholesale and returns the previous snapshot.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(catalog))
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog construction errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A persisted locale document was not a valid nested string tree.
    #[error("malformed locale document for '{language}': {detail}")]
    Malformed {
        /// Language whose document failed to parse or flatten.
        language: LanguageTag,
        /// Human-readable failure detail.
        detail: String,
    },
    /// A requested language has no backing table.
    #[error("no locale table loaded for language '{language}'")]
    MissingLanguage {
        /// Language that has no table.
        language: LanguageTag,
    },
}
