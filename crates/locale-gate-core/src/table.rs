// crates/locale-gate-core/src/table.rs
// ============================================================================
// Module: Locale Table
// Description: One language's flattened key-path to translation mapping.
// Purpose: Materialize nested locale documents into an immutable leaf map.
// Dependencies: crate::{catalog, identifiers}, serde_json
// ============================================================================

//! ## Overview
//! A [`LocaleTable`] is the in-memory form of one persisted locale document:
//! a nested JSON tree whose interior keys are namespaces and whose leaves are
//! translation strings. Tables are flattened at construction so lookups and
//! parity diffs work over plain dotted key paths, and they are never mutated
//! after load; reloads replace the whole table.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;

use crate::catalog::CatalogError;
use crate::identifiers::KeyPath;
use crate::identifiers::LanguageTag;

// ============================================================================
// SECTION: Locale Table
// ============================================================================

/// Immutable flattened translation map for a single language.
///
/// # Invariants
/// - Every key is a validated dotted [`KeyPath`]; every value is the leaf
///   translation string from the source document.
/// - Iteration order is deterministic (sorted by key path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTable {
    /// Language this table translates into.
    language: LanguageTag,
    /// Flattened leaf entries.
    entries: BTreeMap<KeyPath, String>,
}

impl LocaleTable {
    /// Creates an empty table for `language`.
    #[must_use]
    pub const fn new(language: LanguageTag) -> Self {
        Self {
            language,
            entries: BTreeMap::new(),
        }
    }

    /// Builds a table by flattening a parsed locale document.
    ///
    /// The root must be a JSON object; interior nodes must be objects and
    /// every leaf must be a string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] when the document shape or any
    /// namespace segment is invalid.
    pub fn from_json_value(language: LanguageTag, document: &Value) -> Result<Self, CatalogError> {
        let Value::Object(root) = document else {
            return Err(CatalogError::Malformed {
                language: language.clone(),
                detail: "locale document root must be an object".to_string(),
            });
        };
        let mut entries = BTreeMap::new();
        for (segment, node) in root {
            if segment.contains('.') {
                return Err(CatalogError::Malformed {
                    language: language.clone(),
                    detail: format!("namespace segment '{segment}' must not contain dots"),
                });
            }
            let path = KeyPath::parse(segment).map_err(|err| CatalogError::Malformed {
                language: language.clone(),
                detail: format!("invalid namespace segment '{segment}': {err}"),
            })?;
            flatten_node(&language, &path, node, &mut entries)?;
        }
        Ok(Self {
            language,
            entries,
        })
    }

    /// Parses and flattens a locale document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] when the text is not valid JSON or
    /// the document shape is invalid.
    pub fn from_json_str(language: LanguageTag, text: &str) -> Result<Self, CatalogError> {
        let document: Value = serde_json::from_str(text).map_err(|err| CatalogError::Malformed {
            language: language.clone(),
            detail: format!("invalid JSON: {err}"),
        })?;
        Self::from_json_value(language, &document)
    }

    /// Inserts a leaf translation, replacing any previous value.
    ///
    /// Intended for tooling and tests; the running application treats tables
    /// as immutable after load.
    pub fn insert(&mut self, key: KeyPath, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    /// Looks up the translation for `key`.
    #[must_use]
    pub fn get(&self, key: &KeyPath) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the language this table translates into.
    #[must_use]
    pub const fn language(&self) -> &LanguageTag {
        &self.language
    }

    /// Iterates all leaf key paths in sorted order.
    pub fn leaf_keys(&self) -> impl Iterator<Item = &KeyPath> {
        self.entries.keys()
    }

    /// Iterates all `(key, translation)` entries in sorted order.
    pub fn entries(&self) -> impl Iterator<Item = (&KeyPath, &str)> {
        self.entries.iter().map(|(key, value)| (key, value.as_str()))
    }

    /// Number of leaf entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Flattens one document node rooted at `path` into `entries`.
fn flatten_node(
    language: &LanguageTag,
    path: &KeyPath,
    node: &Value,
    entries: &mut BTreeMap<KeyPath, String>,
) -> Result<(), CatalogError> {
    match node {
        Value::String(leaf) => {
            entries.insert(path.clone(), leaf.clone());
            Ok(())
        }
        Value::Object(children) => {
            for (segment, child) in children {
                let child_path = path.child(segment).map_err(|err| CatalogError::Malformed {
                    language: language.clone(),
                    detail: format!("invalid namespace segment under '{path}': {err}"),
                })?;
                flatten_node(language, &child_path, child, entries)?;
            }
            Ok(())
        }
        other => Err(CatalogError::Malformed {
            language: language.clone(),
            detail: format!("leaf at '{path}' must be a string, found {}", json_kind(other)),
        }),
    }
}

/// Names a JSON value kind for malformed-document messages.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
