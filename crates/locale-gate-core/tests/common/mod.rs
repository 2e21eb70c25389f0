// crates/locale-gate-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Fixtures
// Description: Shared catalog builders for locale-gate-core tests.
// Purpose: Keep per-test setup small and consistent.
// ============================================================================

use locale_gate_core::Catalog;
use locale_gate_core::KeyPath;
use locale_gate_core::LanguageTag;
use locale_gate_core::LocaleTable;

/// Parses a language tag, stringifying errors for `TestResult` plumbing.
pub fn tag(value: &str) -> Result<LanguageTag, String> {
    LanguageTag::parse(value).map_err(|err| err.to_string())
}

/// Parses a key path, stringifying errors for `TestResult` plumbing.
pub fn key(value: &str) -> Result<KeyPath, String> {
    KeyPath::parse(value).map_err(|err| err.to_string())
}

/// Builds a table from `(key, translation)` pairs.
pub fn table(language: &str, entries: &[(&str, &str)]) -> Result<LocaleTable, String> {
    let mut table = LocaleTable::new(tag(language)?);
    for (path, value) in entries {
        table.insert(key(path)?, *value);
    }
    Ok(table)
}

/// Catalog with a fully populated `en` default and a `zh` table missing
/// one key.
pub fn sample_catalog() -> Result<Catalog, String> {
    let en = table(
        "en",
        &[
            ("create.step2.minPrice", "Minimum 0.0001 MLT"),
            ("market.totalCost", "Total: {amount} MLT"),
            ("market.title", "Market"),
            ("common.ok", "OK"),
        ],
    )?;
    let zh = table(
        "zh",
        &[
            ("market.totalCost", "總計:{amount} MLT"),
            ("market.title", "市場"),
            ("common.ok", "好"),
        ],
    )?;
    Catalog::from_tables(tag("en")?, vec![en, zh]).map_err(|err| err.to_string())
}
