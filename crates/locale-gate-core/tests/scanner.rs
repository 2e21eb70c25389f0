// crates/locale-gate-core/tests/scanner.rs
// ============================================================================
// Module: Foreign Script Scanner Tests
// Description: Out-of-range run detection, allowlisting, and positions.
// Purpose: Ensure leaked untranslated text is caught and labels are spared.
// ============================================================================

//! ## Overview
//! Finds CJK runs in sources expected to be Latin-script, without flagging
//! an intentional native-script language label.

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

use locale_gate_core::ScriptRange;
use locale_gate_core::latin_expected;
use locale_gate_core::scan_for_foreign_script;

#[test]
fn allowlisted_label_is_never_reported() {
    let source = "const label = '中文';";
    let findings = scan_for_foreign_script("switcher.js", source, &latin_expected(), &["中文"]);
    assert!(findings.is_empty());
}

#[test]
fn same_text_without_allowlist_is_reported() {
    let source = "const label = '中文';";
    let findings = scan_for_foreign_script("switcher.js", source, &latin_expected(), &[]);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].text, "中文");
    assert_eq!(findings[0].source, "switcher.js");
    assert_eq!(findings[0].line, 1);
    assert_eq!(findings[0].column, 16);
}

#[test]
fn allowlist_match_is_exact_on_the_whole_run() {
    // A longer run containing the allowlisted literal is still a leak.
    let findings = scan_for_foreign_script("app.js", "x 中文字 y", &latin_expected(), &["中文"]);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].text, "中文字");
}

#[test]
fn runs_are_reported_per_line() {
    let source = "alert('加載失敗');\nconsole.log('ok');\nreturn '重試';";
    let findings = scan_for_foreign_script("market.js", source, &latin_expected(), &[]);
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].line, 1);
    assert_eq!(findings[0].text, "加載失敗");
    assert_eq!(findings[1].line, 3);
    assert_eq!(findings[1].text, "重試");
}

#[test]
fn accented_latin_is_within_the_default_expected_set() {
    let findings =
        scan_for_foreign_script("app.js", "const msg = 'Qué onda, señor';", &latin_expected(), &[]);
    assert!(findings.is_empty());
}

#[test]
fn expected_ranges_are_caller_defined() {
    // Scanning a Chinese document for stray Latin flags the ASCII word.
    let expected = [ScriptRange::CJK_UNIFIED, ScriptRange::new(0x3000, 0x303F)];
    let findings = scan_for_foreign_script("zh.txt", "歡迎 hello 你好", &expected, &[]);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].text, " hello ");
}

#[test]
fn adjacent_runs_split_by_expected_characters() {
    let findings = scan_for_foreign_script("app.js", "中a文", &latin_expected(), &[]);
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].text, "中");
    assert_eq!(findings[0].column, 1);
    assert_eq!(findings[1].text, "文");
    assert_eq!(findings[1].column, 3);
}

#[test]
fn scanner_is_pure_over_its_inputs() {
    let source = "const label = '中文';";
    let allow = ["中文"];
    let expected = latin_expected();
    let first = scan_for_foreign_script("a.js", source, &expected, &allow);
    let second = scan_for_foreign_script("a.js", source, &expected, &allow);
    assert_eq!(first, second);
}
