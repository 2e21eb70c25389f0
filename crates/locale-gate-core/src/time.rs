// crates/locale-gate-core/src/time.rs
// ============================================================================
// Module: Locale Gate Time Values
// Description: Timestamp representation for locale change events.
// Purpose: Stamp switch events without spreading clock reads through core.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Locale change events carry an explicit unix-millisecond timestamp. The
//! only clock read in the crate happens at the moment a switch is recorded;
//! tests construct timestamps directly for determinism.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Unix-epoch milliseconds timestamp.
///
/// # Invariants
/// - No monotonicity is enforced; values reflect whatever clock or literal
///   produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Wraps a unix-millisecond value.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Reads the host clock, saturating at the i64 range.
    #[must_use]
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX));
        Self(millis)
    }

    /// Returns the value as unix milliseconds.
    #[must_use]
    pub const fn as_unix_millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
