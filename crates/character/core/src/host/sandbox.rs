//! In-memory host for tests and headless tools.
//!
//! The sandbox models just enough of an engine to exercise the character:
//! a flat ground plane, a humanoid skeleton with one body per bone, three rig
//! sources anchored to the root, and an animator that plays stand-up clips for a
//! fixed time before falling back to idle. It also records every force and
//! clip request so tests can assert on them.

use std::collections::{BTreeMap, HashMap};

use glam::{Quat, Vec3};

use super::{
    AnimParam, Animator, BodyFlags, BodyId, Bone, CharacterHost, ExplosionForce, ForceMode,
    LayerMask, Locomotion, Physics, RaycastHit, RigSurface, Scene, Skeleton, TargetId,
};
use crate::config::{RagdollConfig, RecoveryConfig};
use crate::rig::RigChannel;

/// Complete in-memory engine.
#[derive(Clone, Debug)]
pub struct SandboxHost {
    pub animator: SandboxAnimator,
    pub locomotion: SandboxLocomotion,
    pub physics: SandboxPhysics,
    pub skeleton: SandboxSkeleton,
    pub rig: SandboxRig,
    pub scene: SandboxScene,
}

impl SandboxHost {
    /// Seconds a stand-up clip plays before the animator returns to idle.
    pub const STAND_UP_LENGTH: f32 = 1.0;

    /// Humanoid standing at the origin on a ground plane at `y = 0`.
    pub fn humanoid() -> Self {
        let skeleton = SandboxSkeleton::humanoid();
        let physics = SandboxPhysics::with_bodies(skeleton.ragdoll_bodies(), 0.0);
        let idle = RecoveryConfig::DEFAULT_IDLE_STATE;

        let mut animator = SandboxAnimator::new(idle);
        animator.add_clip(
            RagdollConfig::DEFAULT_STAND_UP_FRONT,
            Self::STAND_UP_LENGTH,
            idle,
        );
        animator.add_clip(
            RagdollConfig::DEFAULT_STAND_UP_BACK,
            Self::STAND_UP_LENGTH,
            idle,
        );

        Self {
            animator,
            locomotion: SandboxLocomotion::new(Vec3::ZERO, Some(0.0)),
            physics,
            skeleton,
            rig: SandboxRig::humanoid(),
            scene: SandboxScene::default(),
        }
    }

    /// Advances the engine side of one tick (animator clock, controller velocity).
    pub fn step(&mut self, dt: f32) {
        self.animator.advance(dt);
        self.locomotion.finish_tick(dt);
        self.rig.anchor = self.locomotion.position;
    }
}

impl Default for SandboxHost {
    fn default() -> Self {
        Self::humanoid()
    }
}

impl CharacterHost for SandboxHost {
    fn animator(&mut self) -> &mut dyn Animator {
        &mut self.animator
    }

    fn locomotion(&mut self) -> &mut dyn Locomotion {
        &mut self.locomotion
    }

    fn physics(&mut self) -> &mut dyn Physics {
        &mut self.physics
    }

    fn skeleton(&mut self) -> &mut dyn Skeleton {
        &mut self.skeleton
    }

    fn rig(&mut self) -> &mut dyn RigSurface {
        &mut self.rig
    }

    fn scene(&self) -> &dyn Scene {
        &self.scene
    }
}

// ============================================================================
// Animator
// ============================================================================

#[derive(Clone, Debug)]
struct SandboxClip {
    length: f32,
    next: String,
}

/// Animator with named states, timed clips, and a parameter store.
#[derive(Clone, Debug)]
pub struct SandboxAnimator {
    pub enabled: bool,
    pub floats: HashMap<AnimParam, f32>,
    pub bools: HashMap<AnimParam, bool>,
    /// Every clip requested through [`Animator::play`], in order.
    pub played: Vec<String>,
    state: String,
    state_time: f32,
    clips: HashMap<String, SandboxClip>,
}

impl SandboxAnimator {
    pub fn new(initial_state: &str) -> Self {
        Self {
            enabled: true,
            floats: HashMap::new(),
            bools: HashMap::new(),
            played: Vec::new(),
            state: initial_state.to_owned(),
            state_time: 0.0,
            clips: HashMap::new(),
        }
    }

    /// Registers a clip that hands over to `next` after `length` seconds.
    pub fn add_clip(&mut self, name: &str, length: f32, next: &str) {
        self.clips.insert(
            name.to_owned(),
            SandboxClip {
                length,
                next: next.to_owned(),
            },
        );
    }

    pub fn current_state(&self) -> &str {
        &self.state
    }

    pub fn float(&self, param: AnimParam) -> Option<f32> {
        self.floats.get(&param).copied()
    }

    pub fn bool(&self, param: AnimParam) -> Option<bool> {
        self.bools.get(&param).copied()
    }

    /// Advances the current clip; a finished clip hands over to its successor.
    pub fn advance(&mut self, dt: f32) {
        if !self.enabled {
            return;
        }
        self.state_time += dt.max(0.0);

        if let Some(clip) = self.clips.get(&self.state)
            && self.state_time >= clip.length
        {
            self.state = clip.next.clone();
            self.state_time = 0.0;
        }
    }
}

impl Animator for SandboxAnimator {
    fn set_float(&mut self, param: AnimParam, value: f32) {
        self.floats.insert(param, value);
    }

    fn set_bool(&mut self, param: AnimParam, value: bool) {
        self.bools.insert(param, value);
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_playing(&self, state: &str) -> bool {
        self.state == state
    }

    fn play(&mut self, clip: &str) {
        self.state = clip.to_owned();
        self.state_time = 0.0;
        self.played.push(clip.to_owned());
    }
}

// ============================================================================
// Locomotion
// ============================================================================

/// Capsule controller that slides freely and never sinks below an optional floor.
#[derive(Clone, Debug)]
pub struct SandboxLocomotion {
    pub enabled: bool,
    pub position: Vec3,
    pub yaw: f32,
    pub velocity: Vec3,
    pub floor: Option<f32>,
    /// Displacements accepted through [`Locomotion::move_by`], in order.
    pub moves: Vec<Vec3>,
    pending: Vec3,
}

impl SandboxLocomotion {
    pub fn new(position: Vec3, floor: Option<f32>) -> Self {
        Self {
            enabled: true,
            position,
            yaw: 0.0,
            velocity: Vec3::ZERO,
            floor,
            moves: Vec::new(),
            pending: Vec3::ZERO,
        }
    }

    /// Converts the displacement accumulated this tick into a velocity.
    pub fn finish_tick(&mut self, dt: f32) {
        self.velocity = if dt > 0.0 {
            self.pending / dt
        } else {
            Vec3::ZERO
        };
        self.pending = Vec3::ZERO;
    }
}

impl Locomotion for SandboxLocomotion {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn move_by(&mut self, displacement: Vec3) {
        if !self.enabled {
            return;
        }
        let before = self.position;
        let mut next = before + displacement;
        if let Some(floor) = self.floor {
            next.y = next.y.max(floor);
        }
        self.position = next;
        self.pending += next - before;
        self.moves.push(displacement);
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn set_yaw(&mut self, degrees: f32) {
        self.yaw = degrees;
    }
}

// ============================================================================
// Physics
// ============================================================================

/// A force recorded by the sandbox physics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AppliedForce {
    Linear { force: Vec3, mode: ForceMode },
    Explosion { explosion: ExplosionForce, mode: ForceMode },
}

/// Recorded state of one sandbox body.
#[derive(Clone, Debug, PartialEq)]
pub struct SandboxBody {
    pub flags: BodyFlags,
    pub forces: Vec<AppliedForce>,
}

/// Ground plane plus a flat body table.
#[derive(Clone, Debug)]
pub struct SandboxPhysics {
    pub bodies: BTreeMap<BodyId, SandboxBody>,
    /// Height of the ground plane; `None` removes it.
    pub ground_height: Option<f32>,
    pub ground_layers: LayerMask,
}

impl SandboxPhysics {
    pub fn with_bodies(bodies: impl IntoIterator<Item = BodyId>, ground_height: f32) -> Self {
        let bodies = bodies
            .into_iter()
            .map(|id| {
                (
                    id,
                    SandboxBody {
                        flags: BodyFlags::empty(),
                        forces: Vec::new(),
                    },
                )
            })
            .collect();

        Self {
            bodies,
            ground_height: Some(ground_height),
            ground_layers: LayerMask::GROUND,
        }
    }

    pub fn body(&self, id: BodyId) -> Option<&SandboxBody> {
        self.bodies.get(&id)
    }

    fn ground(&self, layers: LayerMask) -> Option<f32> {
        self.ground_height
            .filter(|_| layers.intersects(self.ground_layers))
    }
}

impl Physics for SandboxPhysics {
    fn check_sphere(&self, center: Vec3, radius: f32, layers: LayerMask) -> bool {
        self.ground(layers)
            .is_some_and(|ground| center.y - radius <= ground)
    }

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RaycastHit> {
        let ground = self.ground(layers)?;
        let direction = direction.normalize_or_zero();
        if direction.y >= 0.0 || origin.y < ground {
            return None;
        }

        let distance = (ground - origin.y) / direction.y;
        (distance <= max_distance).then(|| RaycastHit {
            point: origin + direction * distance,
            distance,
        })
    }

    fn body_flags(&self, body: BodyId) -> BodyFlags {
        self.bodies
            .get(&body)
            .map_or(BodyFlags::empty(), |b| b.flags)
    }

    fn set_body_flags(&mut self, body: BodyId, flags: BodyFlags) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.flags = flags;
        }
    }

    fn add_force(&mut self, body: BodyId, force: Vec3, mode: ForceMode) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.forces.push(AppliedForce::Linear { force, mode });
        }
    }

    fn add_explosion_force(&mut self, body: BodyId, explosion: ExplosionForce, mode: ForceMode) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.forces.push(AppliedForce::Explosion { explosion, mode });
        }
    }
}

// ============================================================================
// Skeleton
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
struct SandboxBone {
    position: Vec3,
    rotation: Quat,
    body: Option<BodyId>,
}

/// Bone table with world-space transforms.
#[derive(Clone, Debug, Default)]
pub struct SandboxSkeleton {
    bones: BTreeMap<Bone, SandboxBone>,
}

impl SandboxSkeleton {
    /// T-posed humanoid, about 1.8 m tall, one body per bone.
    pub fn humanoid() -> Self {
        const LAYOUT: [(Bone, [f32; 3]); 16] = [
            (Bone::Hips, [0.0, 1.0, 0.0]),
            (Bone::Spine, [0.0, 1.15, 0.0]),
            (Bone::Chest, [0.0, 1.35, 0.0]),
            (Bone::Head, [0.0, 1.65, 0.0]),
            (Bone::LeftUpperArm, [-0.2, 1.45, 0.0]),
            (Bone::LeftLowerArm, [-0.45, 1.45, 0.0]),
            (Bone::LeftHand, [-0.7, 1.45, 0.0]),
            (Bone::RightUpperArm, [0.2, 1.45, 0.0]),
            (Bone::RightLowerArm, [0.45, 1.45, 0.0]),
            (Bone::RightHand, [0.7, 1.45, 0.0]),
            (Bone::LeftUpperLeg, [-0.1, 0.9, 0.0]),
            (Bone::LeftLowerLeg, [-0.1, 0.5, 0.0]),
            (Bone::LeftFoot, [-0.1, 0.08, 0.0]),
            (Bone::RightUpperLeg, [0.1, 0.9, 0.0]),
            (Bone::RightLowerLeg, [0.1, 0.5, 0.0]),
            (Bone::RightFoot, [0.1, 0.08, 0.0]),
        ];

        let bones = LAYOUT
            .iter()
            .zip(0u32..)
            .map(|(&(bone, position), id)| {
                (
                    bone,
                    SandboxBone {
                        position: Vec3::from_array(position),
                        rotation: Quat::IDENTITY,
                        body: Some(BodyId(id)),
                    },
                )
            })
            .collect();

        Self { bones }
    }

    /// Adds or replaces a bone.
    pub fn insert(&mut self, bone: Bone, position: Vec3, body: Option<BodyId>) {
        self.bones.insert(
            bone,
            SandboxBone {
                position,
                rotation: Quat::IDENTITY,
                body,
            },
        );
    }

    pub fn remove(&mut self, bone: Bone) {
        self.bones.remove(&bone);
    }

    pub fn set_bone_rotation(&mut self, bone: Bone, rotation: Quat) {
        if let Some(b) = self.bones.get_mut(&bone) {
            b.rotation = rotation;
        }
    }
}

impl Skeleton for SandboxSkeleton {
    fn bone_position(&self, bone: Bone) -> Option<Vec3> {
        self.bones.get(&bone).map(|b| b.position)
    }

    fn set_bone_position(&mut self, bone: Bone, position: Vec3) {
        if let Some(b) = self.bones.get_mut(&bone) {
            b.position = position;
        }
    }

    fn bone_rotation(&self, bone: Bone) -> Option<Quat> {
        self.bones.get(&bone).map(|b| b.rotation)
    }

    fn bone_body(&self, bone: Bone) -> Option<BodyId> {
        self.bones.get(&bone).and_then(|b| b.body)
    }

    fn ragdoll_bodies(&self) -> Vec<BodyId> {
        self.bones.values().filter_map(|b| b.body).collect()
    }
}

// ============================================================================
// Rig
// ============================================================================

/// Three rig sources parented to the character root.
#[derive(Clone, Debug)]
pub struct SandboxRig {
    pub weights: [f32; 3],
    /// Source positions relative to `anchor`.
    pub locals: [Vec3; 3],
    /// World position of the sources' parent.
    pub anchor: Vec3,
}

impl SandboxRig {
    /// Head source in front of the face, arm sources in front of each shoulder.
    pub fn humanoid() -> Self {
        Self {
            weights: [0.0; 3],
            locals: [
                Vec3::new(0.0, 1.65, 0.6),
                Vec3::new(-0.25, 1.4, 0.5),
                Vec3::new(0.25, 1.4, 0.5),
            ],
            anchor: Vec3::ZERO,
        }
    }

    pub fn weight(&self, channel: RigChannel) -> f32 {
        self.weights[channel.index()]
    }
}

impl RigSurface for SandboxRig {
    fn set_weight(&mut self, channel: RigChannel, weight: f32) {
        self.weights[channel.index()] = weight;
    }

    fn source_position(&self, channel: RigChannel) -> Vec3 {
        self.anchor + self.locals[channel.index()]
    }

    fn set_source_position(&mut self, channel: RigChannel, position: Vec3) {
        self.locals[channel.index()] = position - self.anchor;
    }

    fn source_local_position(&self, channel: RigChannel) -> Vec3 {
        self.locals[channel.index()]
    }

    fn set_source_local_position(&mut self, channel: RigChannel, position: Vec3) {
        self.locals[channel.index()] = position;
    }
}

// ============================================================================
// Scene
// ============================================================================

/// Camera yaw and a table of movable targets.
#[derive(Clone, Debug, Default)]
pub struct SandboxScene {
    pub camera_yaw: f32,
    targets: BTreeMap<TargetId, Vec3>,
    next_target: u32,
}

impl SandboxScene {
    pub fn spawn_target(&mut self, position: Vec3) -> TargetId {
        let id = TargetId(self.next_target);
        self.next_target += 1;
        self.targets.insert(id, position);
        id
    }

    pub fn move_target(&mut self, target: TargetId, position: Vec3) {
        if let Some(p) = self.targets.get_mut(&target) {
            *p = position;
        }
    }

    pub fn remove_target(&mut self, target: TargetId) {
        self.targets.remove(&target);
    }
}

impl Scene for SandboxScene {
    fn camera_yaw(&self) -> f32 {
        self.camera_yaw
    }

    fn target_position(&self, target: TargetId) -> Option<Vec3> {
        self.targets.get(&target).copied()
    }
}
