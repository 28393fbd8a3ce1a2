//! Parameter domains of curves.

use serde::{Deserialize, Serialize};

/// A scalar interval `(min, max)` over which a curve is parametrized.
///
/// `max` may be smaller than `min`: a clockwise arc keeps the sign of its
/// sweep in its domain, so `length()` is signed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Domain {
    /// Parameter at the start of the curve.
    pub min: f64,
    /// Parameter at the end of the curve.
    pub max: f64,
}

impl Domain {
    /// Create a domain from its end parameters.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Signed length `max - min`.
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// True if the parameter decreases from start to end.
    pub fn is_reversed(&self) -> bool {
        self.max < self.min
    }

    /// Clamp `t` into the domain (never wraps).
    pub fn clamp(&self, t: f64) -> f64 {
        let (lo, hi) = self.bounds();
        t.clamp(lo, hi)
    }

    /// True if `t` lies within the domain, ends included.
    pub fn contains(&self, t: f64) -> bool {
        let (lo, hi) = self.bounds();
        t >= lo && t <= hi
    }

    /// Parameter at `fraction` of the way from `min` to `max`.
    pub fn parameter_at(&self, fraction: f64) -> f64 {
        self.min + fraction * self.length()
    }

    /// Fraction of the way from `min` to `max` at which `t` lies.
    pub fn fraction_of(&self, t: f64) -> f64 {
        let len = self.length();
        if len == 0.0 {
            0.0
        } else {
            (t - self.min) / len
        }
    }

    fn bounds(&self) -> (f64, f64) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }
}
