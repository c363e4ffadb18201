//! The character aggregate: state machine, rig controller and shared motion
//! state driven by one host.

use glam::Vec3;

use crate::config::CharacterConfig;
use crate::error::CharacterError;
use crate::host::{Bone, CharacterHost, ExplosionForce, ForceMode};
use crate::input::InputSnapshot;
use crate::rig::RigController;
use crate::state::{
    BehaviorState, ControllableState, MotorState, RagdollState, RecoveringState, StateContext,
    StateError, StateHandler, StateManager,
};

/// One controllable character.
///
/// The host is passed into every call rather than stored, so the same
/// character can be driven by any [`CharacterHost`] implementation.
#[derive(Debug)]
pub struct Character {
    config: CharacterConfig,
    manager: StateManager,
    rig: RigController,
    motor: MotorState,
    input: InputSnapshot,
}

impl Character {
    /// Builds the character and enters [`BehaviorState::Controllable`].
    ///
    /// Rig origins are captured from the host's current source positions.
    pub fn load(
        config: CharacterConfig,
        host: &mut dyn CharacterHost,
    ) -> Result<Self, CharacterError> {
        let mut rig = RigController::load(&config.rig, host.rig());
        let mut motor = MotorState::default();
        let mut input = InputSnapshot::default();

        let mut ctx = StateContext {
            host,
            rig: &mut rig,
            motor: &mut motor,
            input: &mut input,
            config: &config,
            dt: 0.0,
        };
        let mut manager = StateManager::builder()
            .register(BehaviorState::Controllable, ControllableState::new())
            .register(BehaviorState::Ragdoll, RagdollState::new())
            .register(BehaviorState::Recovering, RecoveringState::new())
            .build(&mut ctx)?;
        manager.set_state(&mut ctx, BehaviorState::Controllable)?;
        tracing::debug!("character loaded");

        Ok(Self {
            config,
            manager,
            rig,
            motor,
            input,
        })
    }

    /// Runs one simulation step: the current state's update, then the rig.
    ///
    /// A negative or NaN `dt` counts as zero.
    pub fn tick(
        &mut self,
        host: &mut dyn CharacterHost,
        input: InputSnapshot,
        dt: f32,
    ) -> Result<(), CharacterError> {
        let dt = if dt > 0.0 { dt } else { 0.0 };
        self.input = input;

        let (manager, mut ctx) = self.split(host, dt);
        manager.update(&mut ctx)?;
        ctx.rig.update(ctx.host, dt);
        Ok(())
    }

    pub fn set_state(
        &mut self,
        host: &mut dyn CharacterHost,
        state: BehaviorState,
    ) -> Result<(), CharacterError> {
        let (manager, mut ctx) = self.split(host, 0.0);
        manager.set_state(&mut ctx, state)
    }

    pub fn compare_current_state(&self, state: BehaviorState) -> bool {
        self.manager.compare_current_state(state)
    }

    pub fn current_state(&self) -> Option<BehaviorState> {
        self.manager.current()
    }

    /// Ragdolls the character if needed, then pushes every body with `force`.
    pub fn add_force(
        &mut self,
        host: &mut dyn CharacterHost,
        force: Vec3,
    ) -> Result<(), CharacterError> {
        self.add_force_with_mode(host, force, ForceMode::Force)
    }

    pub fn add_force_with_mode(
        &mut self,
        host: &mut dyn CharacterHost,
        force: Vec3,
        mode: ForceMode,
    ) -> Result<(), CharacterError> {
        self.with_ragdoll(host, |ragdoll, host| {
            ragdoll.add_force(host.physics(), force, mode);
            Ok(())
        })
    }

    /// [`add_force`](Self::add_force) with the same magnitude on every axis.
    pub fn add_force_uniform(
        &mut self,
        host: &mut dyn CharacterHost,
        force: f32,
    ) -> Result<(), CharacterError> {
        self.add_force(host, Vec3::splat(force))
    }

    /// Ragdolls the character if needed, then pushes the body under `bone`.
    pub fn add_force_limb(
        &mut self,
        host: &mut dyn CharacterHost,
        bone: Bone,
        force: Vec3,
    ) -> Result<(), CharacterError> {
        self.with_ragdoll(host, |ragdoll, host| Ok(ragdoll.add_force_limb(host, bone, force)?))
    }

    /// Ragdolls the character if needed, then applies a radial force.
    pub fn add_explosion_force(
        &mut self,
        host: &mut dyn CharacterHost,
        explosion: ExplosionForce,
        mode: ForceMode,
    ) -> Result<(), CharacterError> {
        self.with_ragdoll(host, |ragdoll, host| {
            ragdoll.add_explosion_force(host.physics(), explosion, mode);
            Ok(())
        })
    }

    pub fn rig(&self) -> &RigController {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut RigController {
        &mut self.rig
    }

    /// Input as left by the last tick; states may consume parts of it (jump).
    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    pub fn motor(&self) -> &MotorState {
        &self.motor
    }

    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    /// Typed access to the handler of `state`.
    pub fn handler_mut<T: StateHandler>(&mut self, state: BehaviorState) -> Option<&mut T> {
        self.manager.handler_mut(state)
    }

    /// Tears the character down, running every state's destroy hook.
    pub fn destroy(mut self, host: &mut dyn CharacterHost) -> Result<(), CharacterError> {
        let (manager, mut ctx) = self.split(host, 0.0);
        let result = manager.destroy(&mut ctx);
        tracing::debug!("character destroyed");
        result
    }

    fn with_ragdoll<F>(
        &mut self,
        host: &mut dyn CharacterHost,
        apply: F,
    ) -> Result<(), CharacterError>
    where
        F: FnOnce(&RagdollState, &mut dyn CharacterHost) -> Result<(), CharacterError>,
    {
        let (manager, mut ctx) = self.split(host, 0.0);
        manager.set_state(&mut ctx, BehaviorState::Ragdoll)?;

        let ragdoll = manager
            .handler_mut::<RagdollState>(BehaviorState::Ragdoll)
            .ok_or(StateError::Unregistered(BehaviorState::Ragdoll))?;
        apply(ragdoll, ctx.host)
    }

    fn split<'a>(
        &'a mut self,
        host: &'a mut dyn CharacterHost,
        dt: f32,
    ) -> (&'a mut StateManager, StateContext<'a>) {
        let Self {
            config,
            manager,
            rig,
            motor,
            input,
        } = self;

        let ctx = StateContext {
            host,
            rig,
            motor,
            input,
            config,
            dt,
        };
        (manager, ctx)
    }
}
