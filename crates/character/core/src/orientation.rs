//! Coarse facing of a body part relative to world up.

use glam::{Quat, Vec3};

/// Which way an object's local axes point, in world terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Forward points up (lying on the back).
    Up,
    /// Forward points down (lying face down).
    Down,
    /// Right axis points up.
    Left,
    /// Right axis points down.
    Right,
    Upright,
}

impl Orientation {
    /// Minimum alignment for an axis to count as pointing along world up/down.
    pub const THRESHOLD: f32 = 0.5;

    /// Classifies from the object's world forward and right axes.
    ///
    /// Forward is checked before right, down before up.
    pub fn classify(forward: Vec3, right: Vec3) -> Self {
        if forward.dot(Vec3::NEG_Y) > Self::THRESHOLD {
            Self::Down
        } else if forward.dot(Vec3::Y) > Self::THRESHOLD {
            Self::Up
        } else if right.dot(Vec3::NEG_Y) > Self::THRESHOLD {
            Self::Right
        } else if (-right).dot(Vec3::NEG_Y) > Self::THRESHOLD {
            Self::Left
        } else {
            Self::Upright
        }
    }

    /// Classifies a world rotation; local forward is +Z, local right is +X.
    pub fn of_rotation(rotation: Quat) -> Self {
        Self::classify(rotation * Vec3::Z, rotation * Vec3::X)
    }
}

#[cfg(test)]
mod tests {
    use core::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn identity_is_upright() {
        assert_eq!(Orientation::of_rotation(Quat::IDENTITY), Orientation::Upright);
    }

    #[test]
    fn pitched_forward_faces_down() {
        // +X rotation tips forward (+Z) toward -Y
        assert_eq!(
            Orientation::of_rotation(Quat::from_rotation_x(FRAC_PI_2)),
            Orientation::Down
        );
        assert_eq!(
            Orientation::of_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            Orientation::Up
        );
    }

    #[test]
    fn rolled_sideways_uses_right_axis() {
        // -Z rotation tips right (+X) toward -Y
        assert_eq!(
            Orientation::of_rotation(Quat::from_rotation_z(-FRAC_PI_2)),
            Orientation::Right
        );
        assert_eq!(
            Orientation::of_rotation(Quat::from_rotation_z(FRAC_PI_2)),
            Orientation::Left
        );
    }

    #[test]
    fn shallow_tilt_stays_upright() {
        assert_eq!(
            Orientation::classify(Vec3::new(0.0, -0.4, 0.9), Vec3::X),
            Orientation::Upright
        );
    }
}
