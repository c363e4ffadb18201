//! Traits describing the engine services the character drives.
//!
//! The character core never talks to a concrete engine. Everything it reads or
//! toggles (animator parameters, the locomotion capsule, physics bodies, bones,
//! rig sources, scene targets) is reached through the traits below, and
//! [`CharacterHost`] bundles them so states and the rig controller receive a
//! single handle per tick.
//!
//! [`SandboxHost`] is a complete in-memory implementation used by tests and the
//! trainer binary.
mod animator;
mod locomotion;
mod physics;
mod rig;
mod sandbox;
mod scene;
mod skeleton;

pub use animator::{AnimParam, Animator};
pub use locomotion::Locomotion;
pub use physics::{BodyFlags, BodyId, ExplosionForce, ForceMode, LayerMask, Physics, RaycastHit};
pub use rig::RigSurface;
pub use sandbox::{
    AppliedForce, SandboxAnimator, SandboxBody, SandboxHost, SandboxLocomotion, SandboxPhysics,
    SandboxRig, SandboxScene, SandboxSkeleton,
};
pub use scene::{Scene, TargetId};
pub use skeleton::{Bone, Skeleton};

/// Aggregates the engine services required by the character.
///
/// Each accessor hands out one service at a time, so callers borrow the host
/// per statement: `host.animator().set_enabled(false)`.
pub trait CharacterHost {
    /// Skinned animation evaluator.
    fn animator(&mut self) -> &mut dyn Animator;

    /// Kinematic movement controller that owns the character root.
    fn locomotion(&mut self) -> &mut dyn Locomotion;

    /// Collision queries and per-body simulation flags.
    fn physics(&mut self) -> &mut dyn Physics;

    /// Bone lookup for the character skeleton.
    fn skeleton(&mut self) -> &mut dyn Skeleton;

    /// Procedural override rigs and their source transforms.
    fn rig(&mut self) -> &mut dyn RigSurface;

    /// Read-only scene data (camera, trackable targets).
    fn scene(&self) -> &dyn Scene;
}
