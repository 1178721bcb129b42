use std::fmt;

use crate::config::SimConfig;

/// Absolute position on the simulated timeline, in ticks since the run began.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    /// Sentinel expiry for effects that never run out on their own.
    pub const NEVER: Self = Self(u64::MAX);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Whole simulated seconds elapsed at this tick (truncating).
    #[inline]
    pub const fn whole_seconds(self) -> u64 {
        self.0 / SimConfig::TICKS_PER_SECOND
    }

    /// Simulated seconds elapsed at this tick, with sub-second precision.
    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / SimConfig::TICKS_PER_SECOND as f64
    }

    /// Returns the tick `ticks` after this one, saturating at [`Tick::NEVER`].
    #[inline]
    pub const fn after(self, ticks: u64) -> Self {
        Self(self.0.saturating_add(ticks))
    }

    /// Returns the tick `seconds` after this one.
    #[inline]
    pub const fn after_seconds(self, seconds: u64) -> Self {
        self.after(SimConfig::seconds_to_ticks(seconds))
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        self.after(rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}s", self.as_secs_f64())
    }
}
