//! Kinematic locomotion controller interface.

use glam::Vec3;

/// Collision-resolving movement controller attached to the character root.
///
/// Yaw is expressed in degrees around world up, matching the camera yaw
/// returned by [`Scene::camera_yaw`](crate::host::Scene::camera_yaw).
pub trait Locomotion {
    fn set_enabled(&mut self, enabled: bool);

    fn is_enabled(&self) -> bool;

    /// Velocity the controller achieved on its last move.
    fn velocity(&self) -> Vec3;

    /// Moves the root by `displacement`, resolving collisions.
    fn move_by(&mut self, displacement: Vec3);

    /// World position of the character root.
    fn position(&self) -> Vec3;

    /// Teleports the root without collision checks.
    fn set_position(&mut self, position: Vec3);

    fn yaw(&self) -> f32;

    fn set_yaw(&mut self, degrees: f32);
}
