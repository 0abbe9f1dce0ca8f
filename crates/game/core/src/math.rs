//! Planar math shared by the decision engine and the tracker.
//!
//! World units are the renderer's pixels. Vectors are [`glam::Vec2`];
//! `normalize_or_zero` yields [`Vec2::ZERO`] instead of NaN for zero-length
//! input, so callers can treat "no direction" as "no movement".
pub use glam::Vec2;

/// Below this length a vector is treated as having no direction.
pub const MIN_DIRECTION_LENGTH: f32 = 1e-6;

/// Whether `v` is long enough to point somewhere.
#[inline]
pub fn has_direction(v: Vec2) -> bool {
    v.is_finite() && v.length() > MIN_DIRECTION_LENGTH
}

/// Unit vector pointing at `degrees`, measured counter-clockwise from +x.
#[inline]
pub fn heading_deg(degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians())
}

/// Linear interpolation from `a` (t = 0) to `b` (t = 1).
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamps into `[0, 1]`. NaN collapses to 0.
#[inline]
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
