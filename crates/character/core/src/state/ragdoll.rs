use core::any::Any;

use glam::Vec3;

use super::{RagdollError, StateContext, StateHandler};
use crate::error::CharacterError;
use crate::host::{BodyFlags, BodyId, Bone, CharacterHost, ExplosionForce, ForceMode, Physics};
use crate::orientation::Orientation;

/// Physics takeover.
///
/// While loaded, every ragdoll body is kept animated (trigger + kinematic) so
/// the skeleton follows the animator. Entering hands the bodies to the physics
/// engine; exiting puts the character root back under the hips and restores
/// animation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RagdollState {
    bodies: Vec<BodyId>,
}

impl RagdollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bodies cached at load.
    pub fn bodies(&self) -> &[BodyId] {
        &self.bodies
    }

    /// Pushes every body with `force`.
    pub fn add_force(&self, physics: &mut dyn Physics, force: Vec3, mode: ForceMode) {
        for &body in &self.bodies {
            physics.add_force(body, force, mode);
        }
    }

    /// Frees the body under `bone` from animation if needed, then pushes it.
    pub fn add_force_limb(
        &self,
        host: &mut dyn CharacterHost,
        bone: Bone,
        force: Vec3,
    ) -> Result<(), RagdollError> {
        let body = host
            .skeleton()
            .bone_body(bone)
            .ok_or(RagdollError::NoBodyForBone(bone))?;

        let physics = host.physics();
        let flags = physics.body_flags(body);
        if flags.contains(BodyFlags::ANIMATED) {
            physics.set_body_flags(body, flags - BodyFlags::ANIMATED);
        }
        physics.add_force(body, force, ForceMode::Force);
        Ok(())
    }

    /// Applies a radial force to every body.
    pub fn add_explosion_force(
        &self,
        physics: &mut dyn Physics,
        explosion: ExplosionForce,
        mode: ForceMode,
    ) {
        for &body in &self.bodies {
            physics.add_explosion_force(body, explosion, mode);
        }
    }

    fn set_animated(&self, physics: &mut dyn Physics, animated: bool) {
        for &body in &self.bodies {
            let flags = physics.body_flags(body);
            let flags = if animated {
                flags | BodyFlags::ANIMATED
            } else {
                flags - BodyFlags::ANIMATED
            };
            physics.set_body_flags(body, flags);
        }
    }

    /// Moves the root under the hips, dropped onto the ground if any is close
    /// below, without dragging the hips along.
    fn root_to_hips(&self, ctx: &mut StateContext<'_>) -> Result<(), RagdollError> {
        let config = &ctx.config.ragdoll;
        let hips = ctx
            .host
            .skeleton()
            .bone_position(config.hip_bone)
            .ok_or(RagdollError::MissingBone(config.hip_bone))?;

        let mut root = hips;
        if let Some(hit) = ctx.host.physics().raycast(
            hips,
            Vec3::NEG_Y,
            config.ground_probe_distance,
            config.ground_layers,
        ) {
            root.y = hit.point.y;
        }

        ctx.host.locomotion().set_position(root);
        ctx.host.skeleton().set_bone_position(config.hip_bone, hips);
        tracing::debug!("ragdoll root placed at {}", root);
        Ok(())
    }
}

impl StateHandler for RagdollState {
    fn on_load(&mut self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        let hip = ctx.config.ragdoll.hip_bone;
        let skeleton = ctx.host.skeleton();
        if skeleton.bone_position(hip).is_none() {
            return Err(RagdollError::MissingBone(hip).into());
        }

        self.bodies = skeleton.ragdoll_bodies();
        self.set_animated(ctx.host.physics(), true);
        tracing::debug!("ragdoll cached {} bodies", self.bodies.len());
        Ok(())
    }

    fn on_enter(&mut self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        ctx.rig
            .discard_all_overrides(ctx.host, ctx.config.ragdoll.override_reset_time);

        ctx.host.animator().set_enabled(false);
        ctx.host.locomotion().set_enabled(false);
        self.set_animated(ctx.host.physics(), false);
        Ok(())
    }

    fn on_exit(&mut self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        self.root_to_hips(ctx)?;

        self.set_animated(ctx.host.physics(), true);
        ctx.host.animator().set_enabled(true);
        ctx.host.locomotion().set_enabled(true);

        let facing = ctx
            .host
            .skeleton()
            .bone_rotation(ctx.config.ragdoll.orientation_bone)
            .map_or(Orientation::Upright, Orientation::of_rotation);
        let ragdoll = &ctx.config.ragdoll;
        let clip = if facing == Orientation::Down {
            &ragdoll.stand_up_front
        } else {
            &ragdoll.stand_up_back
        };
        ctx.host.animator().play(clip);
        tracing::debug!("ragdoll released facing {}, playing {}", facing, clip);
        Ok(())
    }

    fn on_destroy(&mut self, _ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        self.bodies.clear();
        Ok(())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use core::f32::consts::FRAC_PI_2;

    use glam::Quat;

    use super::*;
    use crate::config::CharacterConfig;
    use crate::host::{Animator, Locomotion, SandboxHost, Skeleton};
    use crate::input::InputSnapshot;
    use crate::rig::RigController;
    use crate::state::MotorState;

    struct Fixture {
        host: SandboxHost,
        rig: RigController,
        motor: MotorState,
        input: InputSnapshot,
        config: CharacterConfig,
        state: RagdollState,
    }

    impl Fixture {
        fn new(host: SandboxHost) -> Self {
            let config = CharacterConfig::default();
            let rig = RigController::load(&config.rig, &host.rig);
            Self {
                host,
                rig,
                motor: MotorState::default(),
                input: InputSnapshot::default(),
                config,
                state: RagdollState::new(),
            }
        }

        fn call(
            &mut self,
            hook: impl FnOnce(&mut RagdollState, &mut StateContext<'_>) -> Result<(), CharacterError>,
        ) -> Result<(), CharacterError> {
            let mut ctx = StateContext {
                host: &mut self.host,
                rig: &mut self.rig,
                motor: &mut self.motor,
                input: &mut self.input,
                config: &self.config,
                dt: 0.0,
            };
            hook(&mut self.state, &mut ctx)
        }

        fn all_flags(&self) -> Vec<BodyFlags> {
            self.host.physics.bodies.values().map(|b| b.flags).collect()
        }
    }

    fn loaded() -> Fixture {
        let mut fixture = Fixture::new(SandboxHost::humanoid());
        fixture.call(|s, ctx| s.on_load(ctx)).unwrap();
        fixture
    }

    #[test]
    fn load_requires_hips() {
        let mut host = SandboxHost::humanoid();
        host.skeleton.remove(Bone::Hips);
        let mut fixture = Fixture::new(host);

        let err = fixture.call(|s, ctx| s.on_load(ctx)).unwrap_err();
        assert_eq!(err, CharacterError::from(RagdollError::MissingBone(Bone::Hips)));
    }

    #[test]
    fn load_caches_and_animates_every_body() {
        let fixture = loaded();
        assert_eq!(fixture.state.bodies().len(), 16);
        assert!(fixture.all_flags().iter().all(|f| *f == BodyFlags::ANIMATED));
    }

    #[test]
    fn enter_hands_bodies_to_physics() {
        let mut fixture = loaded();
        fixture.call(|s, ctx| s.on_enter(ctx)).unwrap();

        assert!(!fixture.host.animator.is_enabled());
        assert!(!fixture.host.locomotion.is_enabled());
        assert!(fixture.all_flags().iter().all(BodyFlags::is_empty));
    }

    #[test]
    fn limb_force_frees_only_that_body() {
        let mut fixture = loaded();
        let hand = fixture.host.skeleton.bone_body(Bone::LeftHand).unwrap();

        fixture
            .call(|s, ctx| Ok(s.add_force_limb(ctx.host, Bone::LeftHand, Vec3::X)?))
            .unwrap();

        let freed: Vec<_> = fixture
            .host
            .physics
            .bodies
            .iter()
            .filter(|(_, b)| b.flags.is_empty())
            .map(|(id, _)| *id)
            .collect();
        assert_eq!(freed, [hand]);
        assert_eq!(fixture.host.physics.body(hand).unwrap().forces.len(), 1);
    }

    #[test]
    fn limb_force_needs_a_body() {
        let mut host = SandboxHost::humanoid();
        host.skeleton.insert(Bone::Chest, Vec3::ONE, None);
        let mut fixture = Fixture::new(host);
        fixture.call(|s, ctx| s.on_load(ctx)).unwrap();

        let err = fixture
            .call(|s, ctx| Ok(s.add_force_limb(ctx.host, Bone::Chest, Vec3::X)?))
            .unwrap_err();
        assert_eq!(err, CharacterError::from(RagdollError::NoBodyForBone(Bone::Chest)));
    }

    #[test]
    fn exit_drops_root_under_hips_onto_ground() {
        let mut fixture = loaded();
        fixture.call(|s, ctx| s.on_enter(ctx)).unwrap();

        // Body slid away and lies near the floor
        let hips = Vec3::new(4.0, 0.3, -2.0);
        fixture.host.skeleton.set_bone_position(Bone::Hips, hips);
        fixture.call(|s, ctx| s.on_exit(ctx)).unwrap();

        assert_eq!(fixture.host.locomotion.position(), Vec3::new(4.0, 0.0, -2.0));
        assert_eq!(fixture.host.skeleton.bone_position(Bone::Hips), Some(hips));
        assert!(fixture.host.animator.is_enabled());
        assert!(fixture.host.locomotion.is_enabled());
        assert!(fixture.all_flags().iter().all(|f| *f == BodyFlags::ANIMATED));
    }

    #[test]
    fn exit_keeps_hip_height_without_ground_below() {
        let mut fixture = loaded();
        fixture.host.physics.ground_height = None;
        fixture.call(|s, ctx| s.on_enter(ctx)).unwrap();
        fixture.call(|s, ctx| s.on_exit(ctx)).unwrap();

        assert_eq!(fixture.host.locomotion.position(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn exit_picks_stand_up_clip_by_facing() {
        let mut fixture = loaded();
        fixture
            .host
            .skeleton
            .set_bone_rotation(Bone::Hips, Quat::from_rotation_x(FRAC_PI_2));
        fixture.call(|s, ctx| s.on_enter(ctx)).unwrap();
        fixture.call(|s, ctx| s.on_exit(ctx)).unwrap();

        fixture
            .host
            .skeleton
            .set_bone_rotation(Bone::Hips, Quat::from_rotation_x(-FRAC_PI_2));
        fixture.call(|s, ctx| s.on_enter(ctx)).unwrap();
        fixture.call(|s, ctx| s.on_exit(ctx)).unwrap();

        assert_eq!(fixture.host.animator.played, ["StandUp-Front", "StandUp-Back"]);
    }

    #[test]
    fn destroy_clears_cache() {
        let mut fixture = loaded();
        fixture.call(|s, ctx| s.on_destroy(ctx)).unwrap();
        assert!(fixture.state.bodies().is_empty());
    }
}
