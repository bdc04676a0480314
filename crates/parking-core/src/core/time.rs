// crates/parking-core/src/core/time.rs
// ============================================================================
// Module: Parking Time Model
// Description: Canonical timestamp representation for tickets and audit events.
// Purpose: Keep billing arithmetic explicit and replayable.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Tickets record start and end instants as unix milliseconds. The core
//! types never read wall-clock time; the engine obtains timestamps from an
//! injected [`crate::interfaces::Clock`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Milliseconds in one hour.
pub const MILLIS_PER_HOUR: i64 = 3_600_000;

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// Instant expressed as unix epoch milliseconds.
///
/// # Invariants
/// - Values are supplied by a clock; no monotonicity is assumed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix milliseconds.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as unix milliseconds.
    #[must_use]
    pub const fn as_unix_millis(self) -> i64 {
        self.0
    }

    /// Returns the milliseconds elapsed since `earlier`, clamped to zero.
    #[must_use]
    pub const fn millis_since(self, earlier: Self) -> i64 {
        let delta = self.0.saturating_sub(earlier.0);
        if delta < 0 { 0 } else { delta }
    }

    /// Returns the hours elapsed since `earlier`, clamped to zero.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        reason = "Durations above 2^53 ms are far outside any parking stay."
    )]
    pub fn hours_since(self, earlier: Self) -> f64 {
        self.millis_since(earlier) as f64 / MILLIS_PER_HOUR as f64
    }

    /// Formats the timestamp as RFC 3339 in UTC, when representable.
    #[must_use]
    pub fn to_rfc3339(self) -> Option<String> {
        let nanos = i128::from(self.0) * 1_000_000;
        OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()?.format(&Rfc3339).ok()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Some(text) => f.write_str(&text),
            None => write!(f, "{}ms", self.0),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
