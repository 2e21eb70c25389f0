// crates/locale-gate-core/src/lib.rs
// ============================================================================
// Module: Locale Gate Core Library
// Description: Locale tables, catalog, resolver, switch notifier, scanner.
// Purpose: Pure in-memory localization model shared by loader and CLI.
// Dependencies: serde, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! `locale-gate-core` holds the in-memory localization model: validated
//! language tags and key paths, per-language locale tables, the catalog with
//! its key-set parity contract, the fallback-capable resolver, the locale
//! switch notifier, and the foreign-script scanner used as a CI gate.
//!
//! The crate performs no I/O and exposes no async surface; materializing
//! catalogs from disk lives in `locale-gate-loader`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod identifiers;
pub mod notify;
pub mod resolve;
pub mod scan;
pub mod table;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::Catalog;
pub use catalog::CatalogError;
pub use catalog::CatalogHandle;
pub use catalog::ParityIssue;
pub use catalog::ParityIssueKind;
pub use identifiers::KeyPath;
pub use identifiers::KeyPathError;
pub use identifiers::LanguageTag;
pub use identifiers::LanguageTagError;
pub use notify::ListenerError;
pub use notify::LocaleChangeEvent;
pub use notify::LocaleSwitchNotifier;
pub use notify::MemoryPreferenceStore;
pub use notify::PreferenceError;
pub use notify::PreferenceStore;
pub use notify::Subscription;
pub use notify::UnsupportedLanguageError;
pub use resolve::Resolution;
pub use resolve::ResolutionRequest;
pub use resolve::ResolutionSource;
pub use resolve::resolve;
pub use resolve::resolve_all;
pub use scan::Finding;
pub use scan::ScriptRange;
pub use scan::latin_expected;
pub use scan::scan_for_foreign_script;
pub use table::LocaleTable;
pub use time::Timestamp;
