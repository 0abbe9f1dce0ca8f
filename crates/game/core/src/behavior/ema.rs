//! Exponential moving average with first-sample initialization.

use crate::math::lerp;

/// Exponential moving average `avg = avg * (1 - alpha) + sample * alpha`.
///
/// Unlike the textbook form, the first sample replaces the average outright
/// instead of blending from zero, so early samples are not biased toward 0.
/// An average of exactly `0.0` counts as empty: seeding with zero leaves the
/// next sample free to initialize it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ema {
    value: f32,
    alpha: f32,
}

impl Ema {
    pub fn new(alpha: f32) -> Self {
        Self { value: 0.0, alpha }
    }

    /// Starts the average from a known baseline. Negative seeds are floored at 0.
    pub fn seed(&mut self, value: f32) {
        self.value = if value.is_finite() { value.max(0.0) } else { 0.0 };
    }

    /// Folds a sample into the average and returns the new value.
    pub fn update(&mut self, sample: f32) -> f32 {
        let base = if self.is_empty() { sample } else { self.value };
        self.value = lerp(base, sample, self.alpha);
        self.value
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value == 0.0
    }
}
