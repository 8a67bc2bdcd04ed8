//! Simulated-time model.
//!
//! # Design
//!
//! Time is represented as integer nanoseconds since the start of the run.
//! Using an integer as the canonical unit means ordering and equality are
//! exact (no floating-point drift) and `SimTime` can be a map key.  The
//! engine's clock is the single source of truth; this crate only carries the
//! values it reports.

use std::fmt;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulated timestamp in nanoseconds.
///
/// A `u64` nanosecond count covers ~584 years of simulated time — far longer
/// than any conceivable run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);
    pub const MAX: SimTime = SimTime(u64::MAX);

    #[inline]
    pub fn from_nanos(nanos: u64) -> SimTime {
        SimTime(nanos)
    }

    #[inline]
    pub fn from_millis(millis: u64) -> SimTime {
        SimTime(millis * 1_000_000)
    }

    #[inline]
    pub fn from_secs(secs: u64) -> SimTime {
        SimTime(secs * 1_000_000_000)
    }

    /// Convert from floating-point seconds.  Negative inputs clamp to zero.
    pub fn from_secs_f64(secs: f64) -> SimTime {
        if secs <= 0.0 {
            return SimTime::ZERO;
        }
        SimTime((secs * 1e9) as u64)
    }

    #[inline]
    pub fn as_nanos(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1e9
    }

    /// Elapsed time from `earlier` to `self`, saturating at zero if the
    /// arguments arrive out of order.
    #[inline]
    pub fn since(self, earlier: SimTime) -> SimTime {
        SimTime(self.0.saturating_sub(earlier.0))
    }
}

impl std::ops::Add for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: SimTime) -> SimTime {
        SimTime(self.0 + rhs.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.9}s", self.as_secs_f64())
    }
}

// ── TimeWindow ────────────────────────────────────────────────────────────────

/// The simulated-time interval during which events are actually serialized.
///
/// Both bounds are inclusive.  The default window spans the whole run, so an
/// unconfigured recorder captures everything.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    pub start: SimTime,
    pub stop: SimTime,
}

impl TimeWindow {
    /// A window covering the entire run.
    pub const ALL: TimeWindow = TimeWindow {
        start: SimTime::ZERO,
        stop: SimTime::MAX,
    };

    pub fn new(start: SimTime, stop: SimTime) -> TimeWindow {
        TimeWindow { start, stop }
    }

    /// `true` iff `start <= t <= stop`.
    #[inline]
    pub fn contains(&self, t: SimTime) -> bool {
        self.start <= t && t <= self.stop
    }

    /// `true` when the bounds are ordered (`start <= stop`).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.start <= self.stop
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        TimeWindow::ALL
    }
}
