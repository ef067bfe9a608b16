#![forbid(unsafe_code)]

//! Simulation speed multiplier.

use std::fmt;

/// Speed multiplier applied to every per-tick delta, clamped to
/// `[0.1, 3.0]` and quantized to steps of 0.05 by the adjustment helpers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Speed(f32);

impl Speed {
    pub const MIN: f32 = 0.1;
    pub const MAX: f32 = 3.0;
    /// Dial and keyboard quantum.
    pub const STEP: f32 = 0.05;

    /// Clamps `value` into range. Non-finite input falls back to 1.0.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(Self::MIN, Self::MAX))
        } else {
            Self(1.0)
        }
    }

    /// Maps a dial fraction in `[0, 1]` onto the speed range, rounded to the
    /// nearest 0.05. A centered dial lands on 1.55.
    #[must_use]
    pub fn from_dial_fraction(fraction: f32) -> Self {
        let f = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let raw = Self::MIN + f * (Self::MAX - Self::MIN);
        Self::new(quantize(raw))
    }

    #[inline]
    #[must_use]
    pub fn get(self) -> f32 {
        self.0
    }

    /// One quantum faster, clamped.
    #[must_use]
    pub fn faster(self) -> Self {
        Self::new(quantize(self.0 + Self::STEP))
    }

    /// One quantum slower, clamped.
    #[must_use]
    pub fn slower(self) -> Self {
        Self::new(quantize(self.0 - Self::STEP))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(1.0)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}x", self.0)
    }
}

#[inline]
fn quantize(value: f32) -> f32 {
    (value * 20.0).round() / 20.0
}
