//! Linear range mapping for the telemetry plot

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// A (low, high) pair with `low != high`.
///
/// `low` may be greater than `high`; that simply flips the mapping, which is
/// how plot rows (growing downward) are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    low: f32,
    high: f32,
}

impl Bounds {
    /// Fails if the range is degenerate or not finite
    pub fn new(low: f32, high: f32) -> Result<Self> {
        if !(low.is_finite() && high.is_finite()) {
            bail!("bounds must be finite, got ({low}, {high})");
        }
        if low == high {
            bail!("degenerate bounds ({low}, {high}): lower equals upper");
        }
        Ok(Self { low, high })
    }

    #[inline]
    pub fn low(&self) -> f32 {
        self.low
    }

    #[inline]
    pub fn high(&self) -> f32 {
        self.high
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.high - self.low
    }
}

/// Map `value` from `from` onto `to`. Values outside `from` extrapolate.
#[inline]
pub fn transform(value: f32, from: Bounds, to: Bounds) -> f32 {
    let ratio = (value - from.low) / from.span();
    to.low + ratio * to.span()
}
