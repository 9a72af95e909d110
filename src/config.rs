//! Process-wide tunables.
//!
//! `REFERENCE_YEAR` anchors the date matcher's ambiguity resolution (the
//! candidate whose year is closest to it wins). It's a plain
//! `AtomicI32` rather than something threaded through every call: the
//! matchers are free functions called recursively (repeat matching calls
//! back into `omnimatch`), and plumbing a reference year through every
//! signature would ripple across the whole matcher tree for a value that
//! in practice is set once at startup. Concurrent writers get no
//! ordering guarantee beyond whatever `Ordering::Relaxed` provides; this
//! mirrors upstream's package-level mutable global and carries the same
//! caveat.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use crate::dictionary::RankedDictionaries;

const DEFAULT_REFERENCE_YEAR: i32 = 2017;

static REFERENCE_YEAR: AtomicI32 = AtomicI32::new(DEFAULT_REFERENCE_YEAR);

/// Current reference year used by the date matcher.
pub fn reference_year() -> i32 {
    REFERENCE_YEAR.load(Ordering::Relaxed)
}

/// Overrides the reference year used by the date matcher. Takes effect
/// for matches performed after this call returns; there is no
/// synchronization with matches already in flight on other threads.
pub fn set_reference_year(year: i32) {
    REFERENCE_YEAR.store(year, Ordering::Relaxed);
}

/// Per-call configuration for [`crate::password_strength_with_config`].
///
/// Bundles `reference_year` with the dictionary set a call should use, so
/// callers needing different reference years or different word lists
/// concurrently can each hold their own `Config` and pass it explicitly,
/// rather than going through the shared `REFERENCE_YEAR` global.
/// `reference_year` is still applied by a temporary store into that
/// global for the duration of the call (see
/// [`crate::password_strength_with_config`]) since the matchers read it
/// as free functions rather than taking it as a parameter; concurrent
/// calls with differing reference years still race on that store exactly
/// as described above; only the dictionary set is actually per-call.
#[derive(Debug, Clone)]
pub struct Config {
    /// Reference year for date-matcher ambiguity resolution. Applied by
    /// installing it into the process-wide value before matching.
    pub reference_year: i32,
    /// Dictionary set to match against, threaded through explicitly
    /// instead of defaulting to the built-in minimal set.
    pub dictionaries: Arc<RankedDictionaries>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            reference_year: DEFAULT_REFERENCE_YEAR,
            dictionaries: Arc::new(RankedDictionaries::builtin_minimal()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reference_year_is_2017() {
        assert_eq!(Config::default().reference_year, 2017);
    }

    #[test]
    fn default_dictionaries_are_non_empty() {
        let default_config = Config::default();
        assert!(!default_config.dictionaries.is_empty());
    }

    #[test]
    fn set_and_get_round_trip() {
        let original = reference_year();
        set_reference_year(1999);
        assert_eq!(reference_year(), 1999);
        set_reference_year(original);
    }
}
