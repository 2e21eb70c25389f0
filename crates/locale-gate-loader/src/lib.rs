// crates/locale-gate-loader/src/lib.rs
// ============================================================================
// Module: Locale Gate Loader Library
// Description: Catalog materialization from disk and preference persistence.
// Purpose: Own the system's single async I/O boundary.
// Dependencies: locale-gate-core, serde, serde_json, thiserror, tokio
// ============================================================================

//! ## Overview
//! `locale-gate-loader` reads persisted locale documents
//! (`<root>/<tag>.json`) into [`locale_gate_core::Catalog`] values and
//! persists the user's locale preference. Loading is the only suspension
//! point in the system; everything downstream of a built catalog is
//! synchronous. A reload builds the complete replacement catalog before the
//! single atomic handle swap, so cancellation mid-load leaves the previous
//! catalog untouched.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod loader;
pub mod preference;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use loader::CatalogLoader;
pub use loader::LoadError;
pub use preference::FilePreferenceStore;
