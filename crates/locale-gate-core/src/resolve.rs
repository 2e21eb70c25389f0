// crates/locale-gate-core/src/resolve.rs
// ============================================================================
// Module: Key Resolution
// Description: Fallback-capable lookup turning a key path into display text.
// Purpose: Guarantee every lookup yields visible text, never a blank or error.
// Dependencies: crate::{catalog, identifiers}, tracing
// ============================================================================

//! ## Overview
//! Resolution walks a fixed chain: the active language's table, then the
//! default table, then a caller-supplied literal, then the key path itself
//! echoed as a conspicuous placeholder. Missing translations are expected in
//! a catalog mid-translation, so the chain is total; only the loader treats
//! anything as a hard failure.
//!
//! Template values may carry `{name}` placeholders replaced from the
//! request's named parameters in a single pass. A placeholder with no
//! matching parameter stays literal so the gap shows up in rendered output
//! and tests rather than disappearing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::debug;
use tracing::warn;

use crate::catalog::Catalog;
use crate::identifiers::KeyPath;
use crate::identifiers::LanguageTag;

// ============================================================================
// SECTION: Requests
// ============================================================================

/// One lookup: a key path plus optional parameters and literal fallback.
///
/// Ephemeral; constructed per call and consumed by [`resolve`].
#[derive(Debug, Clone, Copy)]
pub struct ResolutionRequest<'a> {
    /// Key path to resolve.
    pub key: &'a KeyPath,
    /// Named `{placeholder}` substitutions applied to the template.
    pub params: &'a [(&'a str, &'a str)],
    /// Caller-supplied last-resort text when no table has the key.
    pub literal_fallback: Option<&'a str>,
}

impl<'a> ResolutionRequest<'a> {
    /// Creates a request with no parameters and no literal fallback.
    #[must_use]
    pub const fn new(key: &'a KeyPath) -> Self {
        Self {
            key,
            params: &[],
            literal_fallback: None,
        }
    }
}

// ============================================================================
// SECTION: Results
// ============================================================================

/// Which link of the fallback chain produced the resolved text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// Found in the active language's table.
    ActiveLocale,
    /// Found in the default language's table after the active table missed.
    DefaultLocale,
    /// Neither table had the key; the caller's literal fallback was used.
    LiteralFallback,
    /// Nothing matched; the key path itself was echoed.
    KeyPathEcho,
}

/// Resolved display text plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Display text after placeholder substitution.
    pub text: String,
    /// Chain link that produced the text.
    pub source: ResolutionSource,
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves one request against the catalog for the active language.
///
/// Never fails: the chain ends at the key path itself, so a missing
/// translation is visible rather than blank. Fallback and unresolved
/// outcomes are logged for diagnostics.
#[must_use]
pub fn resolve(catalog: &Catalog, active: &LanguageTag, request: &ResolutionRequest<'_>) -> Resolution {
    if let Some(template) = catalog.table(active).and_then(|table| table.get(request.key)) {
        return Resolution {
            text: interpolate(template, request.params),
            source: ResolutionSource::ActiveLocale,
        };
    }

    if active != catalog.default_language()
        && let Some(template) = catalog.default_table().get(request.key)
    {
        debug!(
            key = %request.key,
            active = %active,
            default = %catalog.default_language(),
            "translation fell back to default locale"
        );
        return Resolution {
            text: interpolate(template, request.params),
            source: ResolutionSource::DefaultLocale,
        };
    }

    if let Some(literal) = request.literal_fallback {
        warn!(key = %request.key, active = %active, "key unresolved; using literal fallback");
        return Resolution {
            text: literal.to_string(),
            source: ResolutionSource::LiteralFallback,
        };
    }

    warn!(key = %request.key, active = %active, "key unresolved; echoing key path");
    Resolution {
        text: request.key.as_str().to_string(),
        source: ResolutionSource::KeyPathEcho,
    }
}

/// Resolves a sequence of keys with per-key [`resolve`] semantics.
///
/// Output order matches input order.
#[must_use]
pub fn resolve_all(catalog: &Catalog, active: &LanguageTag, keys: &[KeyPath]) -> Vec<Resolution> {
    keys.iter()
        .map(|key| resolve(catalog, active, &ResolutionRequest::new(key)))
        .collect()
}

// ============================================================================
// SECTION: Interpolation
// ============================================================================

/// Single-pass `{name}` substitution.
///
/// Substituted values are never re-scanned, so a parameter value containing
/// braces cannot trigger further substitution. Unmatched and unclosed tokens
/// are emitted as-is.
fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            result.push(ch);
            continue;
        }
        let mut token = String::new();
        let mut closed = false;
        for inner in chars.by_ref() {
            if inner == '}' {
                closed = true;
                break;
            }
            token.push(inner);
        }
        if !closed {
            result.push('{');
            result.push_str(&token);
            continue;
        }
        match params.iter().find(|(name, _)| *name == token) {
            Some((_, value)) => result.push_str(value),
            None => {
                result.push('{');
                result.push_str(&token);
                result.push('}');
            }
        }
    }

    result
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::interpolate;

    #[test]
    fn interpolate_replaces_named_tokens() {
        assert_eq!(
            interpolate("Total: {amount} MLT", &[("amount", "500")]),
            "Total: 500 MLT"
        );
    }

    #[test]
    fn interpolate_leaves_unmatched_tokens_literal() {
        assert_eq!(interpolate("Hello {name}", &[]), "Hello {name}");
    }

    #[test]
    fn interpolate_handles_unclosed_brace() {
        assert_eq!(interpolate("Hello {name", &[("name", "x")]), "Hello {name");
    }

    #[test]
    fn interpolate_does_not_rescan_substituted_values() {
        assert_eq!(interpolate("{a}", &[("a", "{b}"), ("b", "nope")]), "{b}");
    }

    #[test]
    fn interpolate_replaces_repeated_tokens() {
        assert_eq!(interpolate("{x} and {x}", &[("x", "A")]), "A and A");
    }
}
