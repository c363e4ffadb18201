//! Headless developer trainer: a sandbox character driven by script commands.

use character_core::host::{ExplosionForce, ForceMode, SandboxHost, TargetId};
use character_core::{
    BehaviorState, Character, CharacterError, InputSnapshot, RigChannel, RigController,
};
use glam::Vec3;

use crate::config::TrainerConfig;
use crate::script::Command;

/// Snapshot printed after each `status` command and at the end of a run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TrainerStatus {
    pub elapsed: f32,
    pub state: Option<BehaviorState>,
    pub position: Vec3,
    pub grounded: bool,
    pub weights: RigWeights,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RigWeights {
    pub head: f32,
    pub arm_left: f32,
    pub arm_right: f32,
}

pub struct Trainer {
    host: SandboxHost,
    character: Character,
    input: InputSnapshot,
    dt: f32,
    test_target: TargetId,
    elapsed: f32,
}

impl Trainer {
    /// Uniform force used by the ragdoll toggle.
    pub const RAGDOLL_FORCE: f32 = 200.0;
    pub const LOOK_WEIGHT: f32 = 0.5;
    pub const LOOK_DELAY: f32 = 0.4;
    /// Where the test target spawns: head height, two units ahead.
    pub const TEST_TARGET: Vec3 = Vec3::new(0.0, 1.6, 2.0);

    pub fn new(config: &TrainerConfig) -> Result<Self, CharacterError> {
        let mut host = SandboxHost::humanoid();
        let test_target = host.scene.spawn_target(Self::TEST_TARGET);
        let character = Character::load(config.character.clone(), &mut host)?;

        Ok(Self {
            host,
            character,
            input: InputSnapshot::default(),
            dt: config.dt,
            test_target,
            elapsed: 0.0,
        })
    }

    pub fn execute(&mut self, command: Command) -> Result<(), CharacterError> {
        tracing::debug!("executing {:?}", command);
        match command {
            Command::Ragdoll => self.toggle_ragdoll(),
            Command::Recover => self.recover(),
            Command::Reset => {
                let reset_time = self.character.config().ragdoll.override_reset_time;
                self.character
                    .rig_mut()
                    .discard_all_overrides(&mut self.host, reset_time);
                Ok(())
            }
            Command::Look => {
                self.character.rig_mut().target_override_with_weight(
                    &mut self.host,
                    RigChannel::Head,
                    self.test_target,
                    Self::LOOK_WEIGHT,
                    Self::LOOK_DELAY,
                )?;
                Ok(())
            }
            Command::Track { selector, weight } => {
                self.character.rig_mut().track_object_with_weight(
                    &mut self.host,
                    selector,
                    self.test_target,
                    weight,
                    RigController::TRACK_DELAY,
                );
                Ok(())
            }
            Command::Untrack { selector } => {
                self.character
                    .rig_mut()
                    .untrack_object(&mut self.host, selector);
                Ok(())
            }
            Command::Target(position) => {
                self.host.scene.move_target(self.test_target, position);
                Ok(())
            }
            Command::Move(axis) => {
                self.input.move_axis = axis;
                Ok(())
            }
            Command::Sprint(on) => {
                self.input.sprint = on;
                Ok(())
            }
            Command::Jump => {
                self.input.jump = true;
                Ok(())
            }
            Command::Wait(seconds) => self.wait(seconds),
            Command::Push { bone, force } => {
                self.character.add_force_limb(&mut self.host, bone, force)
            }
            Command::Explode {
                force,
                radius,
                upwards,
            } => {
                let origin = self.host.locomotion.position;
                let explosion =
                    ExplosionForce::new(force, origin, radius).with_upwards_modifier(upwards);
                self.character
                    .add_explosion_force(&mut self.host, explosion, ForceMode::Impulse)
            }
            Command::Status => {
                let status = self.status();
                tracing::info!(
                    "t={:.2}s state={:?} position={} head={:.2}",
                    status.elapsed,
                    status.state,
                    status.position,
                    status.weights.head
                );
                Ok(())
            }
        }
    }

    /// Simulates whole steps covering `seconds`.
    pub fn wait(&mut self, seconds: f32) -> Result<(), CharacterError> {
        if seconds.is_nan() || seconds <= 0.0 {
            return Ok(());
        }
        let steps = (seconds / self.dt).round() as u32;
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// One character tick followed by the sandbox's end-of-frame work.
    pub fn step(&mut self) -> Result<(), CharacterError> {
        self.character.tick(&mut self.host, self.input, self.dt)?;
        self.input = *self.character.input();
        self.host.step(self.dt);
        self.elapsed += self.dt;
        Ok(())
    }

    pub fn status(&self) -> TrainerStatus {
        let rig = self.character.rig();
        TrainerStatus {
            elapsed: self.elapsed,
            state: self.character.current_state(),
            position: self.host.locomotion.position,
            grounded: self.character.motor().grounded,
            weights: RigWeights {
                head: rig.weight(RigChannel::Head),
                arm_left: rig.weight(RigChannel::ArmLeft),
                arm_right: rig.weight(RigChannel::ArmRight),
            },
        }
    }

    pub fn destroy(self) -> Result<(), CharacterError> {
        let Self {
            mut host,
            character,
            ..
        } = self;
        character.destroy(&mut host)
    }

    fn toggle_ragdoll(&mut self) -> Result<(), CharacterError> {
        if !self
            .character
            .compare_current_state(BehaviorState::Controllable)
        {
            tracing::info!(
                "ragdoll ignored in {:?}",
                self.character.current_state()
            );
            return Ok(());
        }
        self.character
            .add_force_uniform(&mut self.host, Self::RAGDOLL_FORCE)
    }

    fn recover(&mut self) -> Result<(), CharacterError> {
        if !self.character.compare_current_state(BehaviorState::Ragdoll) {
            tracing::info!(
                "recover ignored in {:?}",
                self.character.current_state()
            );
            return Ok(());
        }
        self.character
            .set_state(&mut self.host, BehaviorState::Recovering)
    }
}

#[cfg(test)]
mod tests {
    use character_core::host::{AppliedForce, Bone, RigSurface};
    use glam::Vec2;

    use super::*;

    fn trainer() -> Trainer {
        let config = TrainerConfig {
            dt: 0.1,
            ..TrainerConfig::default()
        };
        Trainer::new(&config).unwrap()
    }

    #[test]
    fn ragdoll_only_from_controllable() {
        let mut trainer = trainer();
        trainer.execute(Command::Ragdoll).unwrap();
        assert_eq!(trainer.status().state, Some(BehaviorState::Ragdoll));

        let body = trainer.host.physics.bodies.values().next().unwrap();
        assert_eq!(
            body.forces,
            [AppliedForce::Linear {
                force: Vec3::splat(Trainer::RAGDOLL_FORCE),
                mode: ForceMode::Force,
            }]
        );

        // A second toggle while ragdolled adds nothing
        trainer.execute(Command::Ragdoll).unwrap();
        let body = trainer.host.physics.bodies.values().next().unwrap();
        assert_eq!(body.forces.len(), 1);
    }

    #[test]
    fn recover_only_from_ragdoll() {
        let mut trainer = trainer();
        trainer.execute(Command::Recover).unwrap();
        assert_eq!(trainer.status().state, Some(BehaviorState::Controllable));

        trainer.execute(Command::Ragdoll).unwrap();
        trainer.execute(Command::Recover).unwrap();
        assert_eq!(trainer.status().state, Some(BehaviorState::Recovering));
    }

    #[test]
    fn recovery_finishes_after_stand_up_clip() {
        let mut trainer = trainer();
        trainer.execute(Command::Ragdoll).unwrap();
        trainer.execute(Command::Wait(0.5)).unwrap();
        trainer.execute(Command::Recover).unwrap();

        trainer.execute(Command::Wait(1.5)).unwrap();
        assert_eq!(trainer.status().state, Some(BehaviorState::Controllable));
    }

    #[test]
    fn look_blends_head_to_half_weight() {
        let mut trainer = trainer();
        trainer.execute(Command::Reset).unwrap();
        trainer.execute(Command::Wait(0.3)).unwrap();
        assert_eq!(trainer.status().weights.head, 0.0);

        trainer.execute(Command::Look).unwrap();
        trainer.execute(Command::Wait(0.5)).unwrap();

        let status = trainer.status();
        assert_eq!(status.weights.head, Trainer::LOOK_WEIGHT);
        assert_eq!(status.weights.arm_left, 0.0);
        assert_eq!(
            trainer.host.rig.source_position(RigChannel::Head),
            Trainer::TEST_TARGET
        );
    }

    #[test]
    fn look_fails_once_target_is_gone() {
        let mut trainer = trainer();
        let target = trainer.test_target;
        trainer.host.scene.remove_target(target);

        let err = trainer.execute(Command::Look).unwrap_err();
        assert!(matches!(err, CharacterError::Rig(_)));
    }

    #[test]
    fn jump_is_consumed_by_the_character() {
        let mut trainer = trainer();
        // Jump timeout has to run out on the ground first
        trainer.execute(Command::Wait(1.0)).unwrap();
        trainer.execute(Command::Jump).unwrap();
        assert!(trainer.input.jump);

        trainer.execute(Command::Wait(0.5)).unwrap();
        assert!(!trainer.input.jump);
    }

    #[test]
    fn walking_moves_the_root() {
        let mut trainer = trainer();
        trainer.execute(Command::Move(Vec2::Y)).unwrap();
        trainer.execute(Command::Wait(1.0)).unwrap();

        let status = trainer.status();
        assert!(status.position.z > 0.5, "{status:?}");
        assert!((status.elapsed - 1.0).abs() < 1e-4);
    }

    #[test]
    fn push_ragdolls_and_forces_one_limb() {
        let mut trainer = trainer();
        trainer
            .execute(Command::Push {
                bone: Bone::Head,
                force: Vec3::Y,
            })
            .unwrap();

        assert_eq!(trainer.status().state, Some(BehaviorState::Ragdoll));
        let pushed = trainer
            .host
            .physics
            .bodies
            .values()
            .filter(|body| !body.forces.is_empty())
            .count();
        assert_eq!(pushed, 1);
    }

    #[test]
    fn status_serializes_to_json() {
        let trainer = trainer();
        let json = serde_json::to_value(trainer.status()).unwrap();

        assert_eq!(json["state"], "Controllable");
        assert_eq!(json["weights"]["head"], 1.0);
    }
}
