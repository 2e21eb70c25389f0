// crates/locale-gate-core/src/identifiers.rs
// ============================================================================
// Module: Locale Gate Identifiers
// Description: Validated language tags and dotted translation key paths.
// Purpose: Give catalog addressing a typed, normalized vocabulary.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Two identifier newtypes anchor the catalog model: [`LanguageTag`] names a
//! locale table (`en`, `zh`, `zh-cn`) and [`KeyPath`] addresses one leaf
//! translation inside a table (`create.step2.minPrice`). Both validate on
//! construction so downstream code never re-checks shape.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Language Tags
// ============================================================================

/// Maximum accepted language tag length.
const MAX_LANGUAGE_TAG_LENGTH: usize = 35;

/// Identifier of one locale table, stored lowercase.
///
/// # Invariants
/// - Non-empty ASCII letters, digits, and interior hyphens only.
/// - Always lowercase; construction normalizes case and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct LanguageTag(String);

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = LanguageTagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl LanguageTag {
    /// Parses a language tag, tolerating region suffixes and mixed case.
    ///
    /// `zh_TW` and `zh-TW` both normalize to `zh-tw`.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageTagError`] when the value is empty, too long, or
    /// contains characters outside `[a-z0-9-]` after normalization.
    pub fn parse(value: &str) -> Result<Self, LanguageTagError> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        if normalized.is_empty() {
            return Err(LanguageTagError::Empty);
        }
        if normalized.len() > MAX_LANGUAGE_TAG_LENGTH {
            return Err(LanguageTagError::TooLong {
                length: normalized.len(),
            });
        }
        if normalized.starts_with('-') || normalized.ends_with('-') {
            return Err(LanguageTagError::InvalidCharacter {
                value: normalized,
            });
        }
        if !normalized.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
        {
            return Err(LanguageTagError::InvalidCharacter {
                value: normalized,
            });
        }
        Ok(Self(normalized))
    }

    /// Returns the primary language subtag (`zh-tw` yields `zh`).
    #[must_use]
    pub fn primary(&self) -> Self {
        match self.0.split('-').next() {
            Some(primary) if !primary.is_empty() => Self(primary.to_string()),
            _ => self.clone(),
        }
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Language tag validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LanguageTagError {
    /// The tag was empty after trimming.
    #[error("language tag must be non-empty")]
    Empty,
    /// The tag exceeded the maximum accepted length.
    #[error("language tag exceeds {MAX_LANGUAGE_TAG_LENGTH} characters (got {length})")]
    TooLong {
        /// Observed tag length.
        length: usize,
    },
    /// The tag contained characters outside the accepted alphabet.
    #[error("language tag '{value}' must match [a-z0-9] with interior hyphens")]
    InvalidCharacter {
        /// Normalized tag value that failed validation.
        value: String,
    },
}

// ============================================================================
// SECTION: Key Paths
// ============================================================================

/// Dotted path addressing one leaf translation (`create.step2.minPrice`).
///
/// # Invariants
/// - Non-empty, with no empty segments (no leading, trailing, or doubled
///   dots).
/// - Segments are opaque UTF-8; no case normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct KeyPath(String);

impl From<KeyPath> for String {
    fn from(path: KeyPath) -> Self {
        path.0
    }
}

impl TryFrom<String> for KeyPath {
    type Error = KeyPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl KeyPath {
    /// Parses a dotted key path.
    ///
    /// # Errors
    ///
    /// Returns [`KeyPathError`] when the path is empty or any dot-separated
    /// segment is empty.
    pub fn parse(value: &str) -> Result<Self, KeyPathError> {
        if value.is_empty() {
            return Err(KeyPathError::Empty);
        }
        if value.split('.').any(str::is_empty) {
            return Err(KeyPathError::EmptySegment {
                path: value.to_string(),
            });
        }
        Ok(Self(value.to_string()))
    }

    /// Joins a parent path with one additional segment.
    ///
    /// # Errors
    ///
    /// Returns [`KeyPathError::EmptySegment`] when `segment` is empty or
    /// itself contains a dot.
    pub fn child(&self, segment: &str) -> Result<Self, KeyPathError> {
        if segment.is_empty() || segment.contains('.') {
            return Err(KeyPathError::EmptySegment {
                path: format!("{}.{segment}", self.0),
            });
        }
        Ok(Self(format!("{}.{segment}", self.0)))
    }

    /// Iterates the dot-separated segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Key path validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyPathError {
    /// The path was empty.
    #[error("key path must be non-empty")]
    Empty,
    /// The path contained an empty dot-separated segment.
    #[error("key path '{path}' contains an empty segment")]
    EmptySegment {
        /// Offending path value.
        path: String,
    },
}

// ============================================================================
// SECTION: Tests
// ============================================================================
