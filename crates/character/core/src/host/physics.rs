//! Physics query and body interface.

use glam::Vec3;

/// Handle of a ragdoll body (a collider and rigid body pair) in the physics world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyId(pub u32);

impl core::fmt::Display for BodyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

bitflags::bitflags! {
    /// Simulation flags of a ragdoll body.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BodyFlags: u8 {
        /// Collider reports overlaps instead of producing contacts.
        const TRIGGER = 1 << 0;
        /// Rigid body ignores forces and follows its transform.
        const KINEMATIC = 1 << 1;
        /// Animation-driven body: both of the above.
        const ANIMATED = Self::TRIGGER.bits() | Self::KINEMATIC.bits();
    }
}

bitflags::bitflags! {
    /// Collision layers used to filter queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct LayerMask: u32 {
        const DEFAULT = 1 << 0;
        const IGNORE_RAYCAST = 1 << 2;
        const GROUND = 1 << 3;
        const CHARACTER = 1 << 6;
    }
}

/// How a force is interpreted by the physics engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ForceMode {
    /// Continuous force, scaled by mass and step time.
    #[default]
    Force,
    /// Continuous acceleration, ignoring mass.
    Acceleration,
    /// Instant impulse, scaled by mass.
    Impulse,
    /// Instant velocity change, ignoring mass.
    VelocityChange,
}

/// Radial force applied to every body within `radius` of `position`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosionForce {
    pub force: f32,
    pub position: Vec3,
    pub radius: f32,
    /// Lifts the apparent explosion origin to throw bodies upward.
    pub upwards_modifier: f32,
}

impl ExplosionForce {
    pub fn new(force: f32, position: Vec3, radius: f32) -> Self {
        Self {
            force,
            position,
            radius,
            upwards_modifier: 0.0,
        }
    }

    /// Adds an upward bias (builder pattern).
    #[must_use]
    pub fn with_upwards_modifier(mut self, upwards_modifier: f32) -> Self {
        self.upwards_modifier = upwards_modifier;
        self
    }
}

/// Result of a successful raycast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastHit {
    pub point: Vec3,
    pub distance: f32,
}

/// Collision queries and body control. Queries ignore trigger colliders.
pub trait Physics {
    /// Returns true if a sphere at `center` overlaps any collider on `layers`.
    fn check_sphere(&self, center: Vec3, radius: f32, layers: LayerMask) -> bool;

    /// Casts a ray and returns the closest hit on `layers` within `max_distance`.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RaycastHit>;

    fn body_flags(&self, body: BodyId) -> BodyFlags;

    fn set_body_flags(&mut self, body: BodyId, flags: BodyFlags);

    fn add_force(&mut self, body: BodyId, force: Vec3, mode: ForceMode);

    fn add_explosion_force(&mut self, body: BodyId, explosion: ExplosionForce, mode: ForceMode);
}
