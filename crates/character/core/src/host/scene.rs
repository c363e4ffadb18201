//! Read-only scene lookups.

use glam::Vec3;

/// Weak handle of a trackable object.
///
/// The character never owns targets; a handle whose object is gone simply
/// stops resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetId(pub u32);

impl core::fmt::Display for TargetId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

pub trait Scene {
    /// Yaw of the main camera in degrees.
    fn camera_yaw(&self) -> f32;

    /// Current world position of `target`, or `None` if it no longer exists.
    fn target_position(&self, target: TargetId) -> Option<Vec3>;
}
