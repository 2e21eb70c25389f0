// crates/locale-gate-core/tests/proptest_catalog.rs
// ============================================================================
// Module: Catalog Property-Based Tests
// Description: Property tests for parity, resolution, and interpolation.
// Purpose: Detect panics and invariant drift across wide input ranges.
// ============================================================================

//! Property-based tests for catalog invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeSet;

use locale_gate_core::Catalog;
use locale_gate_core::KeyPath;
use locale_gate_core::LanguageTag;
use locale_gate_core::LocaleTable;
use locale_gate_core::ResolutionRequest;
use locale_gate_core::resolve;
use proptest::prelude::*;

/// Strategy for dotted key paths with 1-3 camel-ish segments.
fn key_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z][a-zA-Z0-9]{0,6}", 1 .. 4).prop_map(|segments| segments.join("."))
}

/// Strategy for a set of distinct key paths.
fn key_set_strategy() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(key_path_strategy(), 0 .. 12)
}

fn table_from_keys(language: &str, keys: &BTreeSet<String>) -> LocaleTable {
    let tag = LanguageTag::parse(language).unwrap();
    let mut table = LocaleTable::new(tag);
    for key in keys {
        table.insert(KeyPath::parse(key).unwrap(), format!("[{language}] {key}"));
    }
    table
}

proptest! {
    /// Parity is empty exactly when the non-default key set equals the
    /// default key set.
    #[test]
    fn parity_empty_iff_key_sets_equal(
        default_keys in key_set_strategy(),
        other_keys in key_set_strategy(),
    ) {
        let en = table_from_keys("en", &default_keys);
        let zh = table_from_keys("zh", &other_keys);
        let catalog =
            Catalog::from_tables(LanguageTag::parse("en").unwrap(), vec![en, zh]).unwrap();
        let issues = catalog.check_parity();
        prop_assert_eq!(issues.is_empty(), default_keys == other_keys);
        // Every divergent key appears exactly once.
        let expected_count = default_keys.symmetric_difference(&other_keys).count();
        prop_assert_eq!(issues.len(), expected_count);
    }

    /// Resolution is total: any key yields text, and a key present nowhere
    /// echoes its own path.
    #[test]
    fn resolution_is_total(
        keys in key_set_strategy(),
        probe in key_path_strategy(),
    ) {
        let en = table_from_keys("en", &keys);
        let catalog =
            Catalog::from_tables(LanguageTag::parse("en").unwrap(), vec![en]).unwrap();
        let active = LanguageTag::parse("en").unwrap();
        let key = KeyPath::parse(&probe).unwrap();
        let resolution = resolve(&catalog, &active, &ResolutionRequest::new(&key));
        if keys.contains(&probe) {
            prop_assert_eq!(resolution.text, format!("[en] {probe}"));
        } else {
            prop_assert_eq!(resolution.text, probe);
        }
    }

    /// A template with no placeholders is untouched by any parameter set,
    /// regardless of parameter order.
    #[test]
    fn placeholder_free_templates_ignore_params(
        template in "[a-zA-Z0-9 .,!?]*",
        params in prop::collection::vec(("[a-z]{1,6}", "[a-zA-Z0-9]{0,6}"), 0 .. 6),
    ) {
        let tag = LanguageTag::parse("en").unwrap();
        let key = KeyPath::parse("probe.text").unwrap();
        let mut table = LocaleTable::new(tag.clone());
        table.insert(key.clone(), template.clone());
        let catalog = Catalog::from_tables(tag.clone(), vec![table]).unwrap();

        let forward: Vec<(&str, &str)> =
            params.iter().map(|(name, value)| (name.as_str(), value.as_str())).collect();
        let mut reversed = forward.clone();
        reversed.reverse();

        let with_forward = resolve(
            &catalog,
            &tag,
            &ResolutionRequest { key: &key, params: &forward, literal_fallback: None },
        );
        let with_reversed = resolve(
            &catalog,
            &tag,
            &ResolutionRequest { key: &key, params: &reversed, literal_fallback: None },
        );
        prop_assert_eq!(&with_forward.text, &template);
        prop_assert_eq!(&with_reversed.text, &template);
    }
}
