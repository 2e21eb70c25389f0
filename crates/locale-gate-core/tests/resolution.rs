// crates/locale-gate-core/tests/resolution.rs
// ============================================================================
// Module: Resolution Tests
// Description: Fallback chain, interpolation, and batch resolution behavior.
// Purpose: Ensure every lookup yields visible text with correct provenance.
// ============================================================================

//! ## Overview
//! Exercises the full fallback chain (active table, default table, literal
//! fallback, key path echo) and parameter substitution against a catalog
//! holding a fully populated `en` table and a partial `zh` table.

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

use locale_gate_core::ResolutionRequest;
use locale_gate_core::ResolutionSource;
use locale_gate_core::resolve;
use locale_gate_core::resolve_all;

mod common;

type TestResult = Result<(), String>;

#[test]
fn active_locale_hit_wins() -> TestResult {
    let catalog = common::sample_catalog()?;
    let zh = common::tag("zh")?;
    let key = common::key("market.title")?;
    let resolution = resolve(&catalog, &zh, &ResolutionRequest::new(&key));
    assert_eq!(resolution.text, "市場");
    assert_eq!(resolution.source, ResolutionSource::ActiveLocale);
    Ok(())
}

#[test]
fn missing_key_falls_back_to_default_locale() -> TestResult {
    let catalog = common::sample_catalog()?;
    let zh = common::tag("zh")?;
    let key = common::key("create.step2.minPrice")?;
    let resolution = resolve(&catalog, &zh, &ResolutionRequest::new(&key));
    assert_eq!(resolution.text, "Minimum 0.0001 MLT");
    assert_eq!(resolution.source, ResolutionSource::DefaultLocale);
    Ok(())
}

#[test]
fn params_substitute_into_active_template() -> TestResult {
    let catalog = common::sample_catalog()?;
    let en = common::tag("en")?;
    let key = common::key("market.totalCost")?;
    let request = ResolutionRequest {
        key: &key,
        params: &[("amount", "500")],
        literal_fallback: None,
    };
    let resolution = resolve(&catalog, &en, &request);
    assert_eq!(resolution.text, "Total: 500 MLT");
    Ok(())
}

#[test]
fn params_are_ignored_by_placeholder_free_templates() -> TestResult {
    let catalog = common::sample_catalog()?;
    let en = common::tag("en")?;
    let key = common::key("common.ok")?;
    let request = ResolutionRequest {
        key: &key,
        params: &[("amount", "500"), ("unrelated", "x")],
        literal_fallback: None,
    };
    assert_eq!(resolve(&catalog, &en, &request).text, "OK");
    Ok(())
}

#[test]
fn unknown_key_uses_literal_fallback() -> TestResult {
    let catalog = common::sample_catalog()?;
    let en = common::tag("en")?;
    let key = common::key("nonexistent.key")?;
    let request = ResolutionRequest {
        key: &key,
        params: &[],
        literal_fallback: Some("N/A"),
    };
    let resolution = resolve(&catalog, &en, &request);
    assert_eq!(resolution.text, "N/A");
    assert_eq!(resolution.source, ResolutionSource::LiteralFallback);
    Ok(())
}

#[test]
fn unknown_key_without_fallback_echoes_key_path() -> TestResult {
    let catalog = common::sample_catalog()?;
    let en = common::tag("en")?;
    let key = common::key("nonexistent.key")?;
    let resolution = resolve(&catalog, &en, &ResolutionRequest::new(&key));
    assert_eq!(resolution.text, "nonexistent.key");
    assert_eq!(resolution.source, ResolutionSource::KeyPathEcho);
    Ok(())
}

#[test]
fn unloaded_language_resolves_through_default() -> TestResult {
    let catalog = common::sample_catalog()?;
    let fr = common::tag("fr")?;
    let key = common::key("market.title")?;
    let resolution = resolve(&catalog, &fr, &ResolutionRequest::new(&key));
    assert_eq!(resolution.text, "Market");
    assert_eq!(resolution.source, ResolutionSource::DefaultLocale);
    Ok(())
}

#[test]
fn unmatched_placeholder_stays_literal() -> TestResult {
    let table = common::table("en", &[("greet", "Hello {name}")])?;
    let catalog = locale_gate_core::Catalog::from_tables(common::tag("en")?, vec![table])
        .map_err(|err| err.to_string())?;
    let en = common::tag("en")?;
    let key = common::key("greet")?;
    let resolution = resolve(&catalog, &en, &ResolutionRequest::new(&key));
    assert_eq!(resolution.text, "Hello {name}");
    Ok(())
}

#[test]
fn resolve_all_preserves_input_order() -> TestResult {
    let catalog = common::sample_catalog()?;
    let zh = common::tag("zh")?;
    let keys = vec![
        common::key("market.title")?,
        common::key("create.step2.minPrice")?,
        common::key("nonexistent.key")?,
    ];
    let resolutions = resolve_all(&catalog, &zh, &keys);
    let texts: Vec<&str> = resolutions.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["市場", "Minimum 0.0001 MLT", "nonexistent.key"]);
    Ok(())
}
