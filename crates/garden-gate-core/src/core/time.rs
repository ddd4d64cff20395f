// crates/garden-gate-core/src/core/time.rs
// ============================================================================
// Module: Garden Gate Time Model
// Description: Canonical timestamp representation for records and claims.
// Purpose: Provide an explicit unix-seconds time value with stable wire form.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Garden Gate timestamps are unix epoch seconds, matching the `iat`/`exp`
//! claims of bearer tokens. The domain model never reads wall-clock time
//! itself; the gateway supplies explicit values so authentication checks
//! stay testable with fixed clocks.

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

/// Canonical timestamp in unix epoch seconds.
///
/// # Invariants
/// - No validation is performed; monotonicity is a caller responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix epoch seconds.
    #[must_use]
    pub const fn from_unix_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Returns the timestamp as unix epoch seconds.
    #[must_use]
    pub const fn as_unix_seconds(self) -> i64 {
        self.0
    }

    /// Reads the current wall-clock time.
    ///
    /// Pre-epoch clocks collapse to zero rather than panicking.
    #[must_use]
    pub fn now() -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
            .unwrap_or(0);
        Self(seconds)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use super::Timestamp;

    #[test]
    fn timestamps_order_by_seconds() {
        let earlier = Timestamp::from_unix_seconds(100);
        let later = Timestamp::from_unix_seconds(200);
        assert!(earlier < later);
    }

    #[test]
    fn timestamps_serialize_transparently() {
        let ts = Timestamp::from_unix_seconds(1_700_000_000);
        assert_eq!(serde_json::to_string(&ts).unwrap(), "1700000000");
    }
}
