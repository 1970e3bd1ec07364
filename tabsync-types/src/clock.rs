//! Wall-clock logical timestamps for last-write-wins resolution.
//!
//! An [`UpdatedAt`] is a plain millisecond count. Local mutations advance it
//! with [`UpdatedAt::tick`], which guarantees a strictly greater value even
//! when the wall clock stalls or steps backwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    /// Returns the current time in milliseconds.
    fn now_millis(&self) -> u64;
}

/// The operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A clock that only moves when told to (for tests and replay).
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Creates a clock frozen at `start` milliseconds.
    #[must_use]
    pub fn new(start: u64) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    /// Sets the current time.
    pub fn set(&self, millis: u64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    /// Moves the clock forward by `millis`.
    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// The `updatedAt` stamp carried by every feature state.
///
/// Ordering is numeric. [`UpdatedAt::ZERO`] is the stamp of a freshly created
/// default state, so any persisted or remote value is newer than it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UpdatedAt(u64);

impl UpdatedAt {
    /// The stamp of a state that has never been mutated.
    pub const ZERO: Self = Self(0);

    /// Creates a stamp from milliseconds since the Unix epoch.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Returns the milliseconds since the Unix epoch.
    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Reads the given clock.
    #[must_use]
    pub fn now(clock: &dyn Clock) -> Self {
        Self(clock.now_millis())
    }

    /// Generates the stamp for the next local mutation.
    ///
    /// The result is the current wall time when that is ahead of `self`,
    /// otherwise `self + 1`.
    #[must_use]
    pub fn tick(&self, clock: &dyn Clock) -> Self {
        let now = clock.now_millis();
        if now > self.0 {
            Self(now)
        } else {
            Self(self.0.saturating_add(1))
        }
    }

    /// Returns true if this stamp is strictly newer than `other`.
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }
}

impl fmt::Display for UpdatedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
