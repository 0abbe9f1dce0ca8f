//! BehaviorSnapshot - normalized summary of the player's recent play style.
//!
//! A snapshot is produced once per tick by the tracker and shared read-only
//! with every enemy deciding that tick. It is immutable: all three metrics are
//! clamped into `[0, 1]` on construction and cannot be changed afterwards.

use crate::math::clamp01;

/// Immutable, normalized play-style metrics.
///
/// - `aggression`: shot frequency relative to the reference rate
/// - `accuracy`: hits / shots fired this session (0 before the first shot)
/// - `preferred_distance`: average firing distance relative to the reference distance
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawSnapshot"))]
pub struct BehaviorSnapshot {
    aggression: f32,
    accuracy: f32,
    preferred_distance: f32,
}

impl BehaviorSnapshot {
    /// All-zero snapshot of a player with no telemetry.
    pub const NEUTRAL: Self = Self {
        aggression: 0.0,
        accuracy: 0.0,
        preferred_distance: 0.0,
    };

    /// Builds a snapshot, clamping every metric into `[0, 1]`.
    pub fn new(aggression: f32, accuracy: f32, preferred_distance: f32) -> Self {
        Self {
            aggression: clamp01(aggression),
            accuracy: clamp01(accuracy),
            preferred_distance: clamp01(preferred_distance),
        }
    }

    #[inline]
    pub fn aggression(&self) -> f32 {
        self.aggression
    }

    #[inline]
    pub fn accuracy(&self) -> f32 {
        self.accuracy
    }

    #[inline]
    pub fn preferred_distance(&self) -> f32 {
        self.preferred_distance
    }
}

/// Wire shape of a snapshot; deserialized values are clamped on conversion.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSnapshot {
    aggression: f32,
    accuracy: f32,
    preferred_distance: f32,
}

#[cfg(feature = "serde")]
impl From<RawSnapshot> for BehaviorSnapshot {
    fn from(raw: RawSnapshot) -> Self {
        Self::new(raw.aggression, raw.accuracy, raw.preferred_distance)
    }
}
