use core::f32::consts::FRAC_PI_2;

use character_core::host::{
    AppliedForce, BodyFlags, Bone, ExplosionForce, ForceMode, SandboxHost, Skeleton,
};
use character_core::{
    BehaviorState, Character, CharacterConfig, CharacterError, InputSnapshot, RigChannel,
    StateError,
};
use glam::{Quat, Vec3};

const DT: f32 = 0.1;

fn setup() -> (SandboxHost, Character) {
    let mut host = SandboxHost::humanoid();
    let character =
        Character::load(CharacterConfig::default(), &mut host).expect("character should load");
    (host, character)
}

fn tick(host: &mut SandboxHost, character: &mut Character) {
    character
        .tick(host, InputSnapshot::default(), DT)
        .expect("tick should succeed");
    host.step(DT);
}

fn all_animated(host: &SandboxHost) -> bool {
    host.physics
        .bodies
        .values()
        .all(|body| body.flags == BodyFlags::ANIMATED)
}

#[test]
fn force_from_controllable_ragdolls_and_pushes_every_body() {
    let (mut host, mut character) = setup();
    assert!(character.compare_current_state(BehaviorState::Controllable));
    assert!(all_animated(&host));

    character
        .add_force(&mut host, Vec3::new(200.0, 200.0, 200.0))
        .expect("force should apply");

    assert_eq!(character.current_state(), Some(BehaviorState::Ragdoll));
    assert!(!host.animator.enabled);
    assert!(!host.locomotion.enabled);
    assert_eq!(host.physics.bodies.len(), 16);
    for body in host.physics.bodies.values() {
        assert!(body.flags.is_empty());
        assert_eq!(
            body.forces,
            [AppliedForce::Linear {
                force: Vec3::splat(200.0),
                mode: ForceMode::Force,
            }]
        );
    }
}

#[test]
fn entering_ragdoll_twice_runs_enter_once() {
    let (mut host, mut character) = setup();
    character
        .set_state(&mut host, BehaviorState::Ragdoll)
        .expect("ragdoll is registered");
    assert!(!host.animator.enabled);

    // A second enter would disable the animator again
    host.animator.enabled = true;
    character
        .set_state(&mut host, BehaviorState::Ragdoll)
        .expect("repeat is a no-op");
    assert!(host.animator.enabled);
}

#[test]
fn ragdoll_discards_rig_overrides() {
    let (mut host, mut character) = setup();
    let target = host.scene.spawn_target(Vec3::new(0.0, 1.6, 3.0));
    character
        .rig_mut()
        .track_object(&mut host, RigChannel::Head, target, 0.3);
    tick(&mut host, &mut character);

    character
        .add_force_uniform(&mut host, 50.0)
        .expect("force should apply");
    assert!(!character.rig().channel(RigChannel::Head).is_tracking());

    // Default reset time is 0.2s
    tick(&mut host, &mut character);
    tick(&mut host, &mut character);
    for channel in RigChannel::ALL {
        assert_eq!(host.rig.weight(channel), 0.0);
    }
}

#[test]
fn exit_restores_flags_after_limb_forces() {
    let (mut host, mut character) = setup();
    character
        .set_state(&mut host, BehaviorState::Ragdoll)
        .expect("ragdoll is registered");

    // Re-animate a few bodies by hand, then free them again with limb forces
    for bone in [Bone::LeftHand, Bone::Head, Bone::RightFoot] {
        let body = host.skeleton.bone_body(bone).expect("humanoid bone");
        host.physics.bodies.get_mut(&body).expect("body").flags = BodyFlags::ANIMATED;
        character
            .add_force_limb(&mut host, bone, Vec3::Y * 30.0)
            .expect("bone has a body");
    }
    character
        .add_explosion_force(
            &mut host,
            ExplosionForce::new(500.0, Vec3::ZERO, 5.0).with_upwards_modifier(1.0),
            ForceMode::Impulse,
        )
        .expect("explosion should apply");

    character
        .set_state(&mut host, BehaviorState::Recovering)
        .expect("recovering is registered");

    assert!(all_animated(&host));
    assert!(host.animator.enabled);
    assert!(host.locomotion.enabled);
}

#[test]
fn full_recovery_cycle_returns_to_control() {
    let (mut host, mut character) = setup();
    character
        .add_force_uniform(&mut host, 200.0)
        .expect("force should apply");

    // Hips come to rest face down, a little off the ground
    host.skeleton
        .set_bone_position(Bone::Hips, Vec3::new(1.5, 0.25, -0.5));
    host.skeleton
        .set_bone_rotation(Bone::Hips, Quat::from_rotation_x(FRAC_PI_2));
    tick(&mut host, &mut character);

    character
        .set_state(&mut host, BehaviorState::Recovering)
        .expect("recovering is registered");
    assert_eq!(host.animator.played.last().map(String::as_str), Some("StandUp-Front"));
    assert_eq!(host.locomotion.position, Vec3::new(1.5, 0.0, -0.5));

    // Stand-up clip lasts one second
    let mut ticks = 0;
    while character.compare_current_state(BehaviorState::Recovering) {
        tick(&mut host, &mut character);
        ticks += 1;
        assert!(ticks < 50, "recovery never finished");
    }
    assert_eq!(character.current_state(), Some(BehaviorState::Controllable));
}

#[test]
fn lying_on_back_picks_back_clip() {
    let (mut host, mut character) = setup();
    character
        .add_force_uniform(&mut host, 200.0)
        .expect("force should apply");
    host.skeleton
        .set_bone_rotation(Bone::Hips, Quat::from_rotation_x(-FRAC_PI_2));

    character
        .set_state(&mut host, BehaviorState::Recovering)
        .expect("recovering is registered");
    assert_eq!(host.animator.played.last().map(String::as_str), Some("StandUp-Back"));
}

#[test]
fn wild_placeholder_is_rejected() {
    let (mut host, mut character) = setup();

    let err = character
        .set_state(&mut host, BehaviorState::Wild)
        .expect_err("wild has no handler");

    assert_eq!(
        err,
        CharacterError::State(StateError::Unregistered(BehaviorState::Wild))
    );
    assert!(character.compare_current_state(BehaviorState::Controllable));
}

#[test]
fn controllable_walks_forward() {
    let (mut host, mut character) = setup();
    let input = InputSnapshot {
        move_axis: glam::Vec2::Y,
        sprint: true,
        ..InputSnapshot::default()
    };

    for _ in 0..30 {
        character
            .tick(&mut host, input, DT)
            .expect("tick should succeed");
        host.step(DT);
    }

    assert!(host.locomotion.position.z > 5.0);
    assert_eq!(host.locomotion.position.y, 0.0);
    assert!(character.motor().grounded);
}

#[test]
fn destroy_runs_cleanly_from_any_state() {
    let (mut host, mut character) = setup();
    character
        .add_force_uniform(&mut host, 10.0)
        .expect("force should apply");
    character.destroy(&mut host).expect("destroy should succeed");
}
