//! Linear interpolation over value types.

use glam::{Vec2, Vec3};

/// A value that can be blended linearly between two endpoints.
///
/// `t` is expected in `[0, 1]`; implementations do not clamp it.
pub trait Lerp: Copy {
    /// Returns `self + (end - self) * t`.
    fn lerp(self, end: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(self, end: Self, t: f32) -> Self {
        self + (end - self) * t
    }
}

impl Lerp for Vec2 {
    #[inline]
    fn lerp(self, end: Self, t: f32) -> Self {
        Vec2::lerp(self, end, t)
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp(self, end: Self, t: f32) -> Self {
        Vec3::lerp(self, end, t)
    }
}
