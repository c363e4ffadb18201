//! Skeleton bone lookup.

use glam::{Quat, Vec3};

use super::BodyId;

/// Humanoid bones the character core can address by name.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Bone {
    Hips,
    Spine,
    Chest,
    Head,
    LeftUpperArm,
    LeftLowerArm,
    LeftHand,
    RightUpperArm,
    RightLowerArm,
    RightHand,
    LeftUpperLeg,
    LeftLowerLeg,
    LeftFoot,
    RightUpperLeg,
    RightLowerLeg,
    RightFoot,
}

/// Bone transforms and the ragdoll bodies attached to them.
pub trait Skeleton {
    /// World position of `bone`, or `None` if the skeleton lacks it.
    fn bone_position(&self, bone: Bone) -> Option<Vec3>;

    fn set_bone_position(&mut self, bone: Bone, position: Vec3);

    /// World rotation of `bone`, or `None` if the skeleton lacks it.
    fn bone_rotation(&self, bone: Bone) -> Option<Quat>;

    /// Body attached to `bone`, if it has one.
    fn bone_body(&self, bone: Bone) -> Option<BodyId>;

    /// Every body under the skeleton root.
    fn ragdoll_bodies(&self) -> Vec<BodyId>;
}
