// crates/locale-gate-core/src/scan.rs
// ============================================================================
// Module: Foreign Script Scanner
// Description: Detects text outside the expected script ranges of a source.
// Purpose: Backstop against untranslated fragments leaking into built output.
// Dependencies: crate (none), serde
// ============================================================================

//! ## Overview
//! Free-text substitution passes routinely leave stray untranslated
//! fragments behind; scanning rendered output for characters outside the
//! expected script is the reliable backstop. The scanner reports each
//! maximal run of out-of-range characters as a [`Finding`] with its source
//! identifier, line, and column, skipping runs that exactly match an
//! allowlisted literal (for intentional native-script labels such as a
//! language name shown in its own script).
//!
//! Scanning is pure: inputs are never mutated, and the scanner never does
//! I/O.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Script Ranges
// ============================================================================

/// Inclusive Unicode codepoint range.
///
/// # Invariants
/// - `start <= end`; constructors in this module uphold it, and `contains`
///   is simply false for an inverted range built by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRange {
    /// First codepoint in the range.
    pub start: u32,
    /// Last codepoint in the range (inclusive).
    pub end: u32,
}

impl ScriptRange {
    /// Basic Latin (ASCII).
    pub const BASIC_LATIN: Self = Self::new(0x0000, 0x007F);
    /// Latin-1 Supplement (accented Western European letters).
    pub const LATIN_1_SUPPLEMENT: Self = Self::new(0x0080, 0x00FF);
    /// Latin Extended-A.
    pub const LATIN_EXTENDED_A: Self = Self::new(0x0100, 0x017F);
    /// Latin Extended-B.
    pub const LATIN_EXTENDED_B: Self = Self::new(0x0180, 0x024F);
    /// General punctuation (curly quotes, dashes, ellipsis).
    pub const GENERAL_PUNCTUATION: Self = Self::new(0x2000, 0x206F);
    /// CJK Unified Ideographs.
    pub const CJK_UNIFIED: Self = Self::new(0x4E00, 0x9FFF);

    /// Creates an inclusive codepoint range.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self {
            start,
            end,
        }
    }

    /// Whether the range contains `ch`.
    #[must_use]
    pub const fn contains(&self, ch: char) -> bool {
        let code = ch as u32;
        self.start <= code && code <= self.end
    }
}

/// Expected ranges for Latin-script sources: ASCII, Western European
/// accents, and typographic punctuation.
#[must_use]
pub fn latin_expected() -> Vec<ScriptRange> {
    vec![
        ScriptRange::BASIC_LATIN,
        ScriptRange::LATIN_1_SUPPLEMENT,
        ScriptRange::LATIN_EXTENDED_A,
        ScriptRange::LATIN_EXTENDED_B,
        ScriptRange::GENERAL_PUNCTUATION,
    ]
}

// ============================================================================
// SECTION: Findings
// ============================================================================

/// One run of out-of-range text detected in a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Identifier of the scanned source (typically a file path).
    pub source: String,
    /// 1-based line number of the run.
    pub line: u32,
    /// 1-based character column where the run starts.
    pub column: u32,
    /// The offending text.
    pub text: String,
}

// ============================================================================
// SECTION: Scanning
// ============================================================================

/// Scans `text` for maximal runs of characters outside every expected range.
///
/// A run that exactly equals an allowlisted literal is skipped. Runs never
/// span lines. The inputs are read-only; `source_id` is copied into each
/// finding so reports can be aggregated across files.
#[must_use]
pub fn scan_for_foreign_script(
    source_id: &str,
    text: &str,
    expected: &[ScriptRange],
    allowlist: &[&str],
) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (line_index, line) in text.lines().enumerate() {
        let mut run = String::new();
        let mut run_column = 0u32;
        let mut column = 0u32;
        for ch in line.chars() {
            column = column.saturating_add(1);
            if expected.iter().any(|range| range.contains(ch)) {
                flush_run(source_id, line_index, run_column, &mut run, allowlist, &mut findings);
            } else {
                if run.is_empty() {
                    run_column = column;
                }
                run.push(ch);
            }
        }
        flush_run(source_id, line_index, run_column, &mut run, allowlist, &mut findings);
    }
    findings
}

/// Closes the current run, recording it unless empty or allowlisted.
fn flush_run(
    source_id: &str,
    line_index: usize,
    run_column: u32,
    run: &mut String,
    allowlist: &[&str],
    findings: &mut Vec<Finding>,
) {
    if run.is_empty() {
        return;
    }
    let text = std::mem::take(run);
    if allowlist.contains(&text.as_str()) {
        return;
    }
    findings.push(Finding {
        source: source_id.to_string(),
        line: u32::try_from(line_index).map_or(u32::MAX, |index| index.saturating_add(1)),
        column: run_column,
        text,
    });
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::ScriptRange;
    use super::latin_expected;
    use super::scan_for_foreign_script;

    #[test]
    fn cjk_range_contains_ideographs() {
        assert!(ScriptRange::CJK_UNIFIED.contains('中'));
        assert!(!ScriptRange::CJK_UNIFIED.contains('a'));
    }

    #[test]
    fn ascii_only_source_is_clean() {
        let findings =
            scan_for_foreign_script("app.js", "const label = 'hello';", &latin_expected(), &[]);
        assert!(findings.is_empty());
    }

    #[test]
    fn run_position_is_one_based() {
        let findings = scan_for_foreign_script("app.js", "ab 中文 cd", &latin_expected(), &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 1);
        assert_eq!(findings[0].column, 4);
        assert_eq!(findings[0].text, "中文");
    }
}
