use character_core::host::{RigSurface, SandboxHost, TargetId};
use character_core::{Character, CharacterConfig, InputSnapshot, RigChannel, RigController, RigSelector};
use glam::Vec3;

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

fn head_source(host: &SandboxHost) -> Vec3 {
    host.rig.source_position(RigChannel::Head)
}

/// Target sitting exactly on the head source, so tracking starts at rest.
fn target_on_head(host: &mut SandboxHost) -> TargetId {
    let position = head_source(host);
    host.scene.spawn_target(position)
}

#[test]
fn set_weight_lands_on_clamped_value_after_duration() {
    let (mut host, mut character) = setup();
    tick(&mut host, &mut character);
    assert_eq!(host.rig.weight(RigChannel::Head), 1.0);

    character.rig_mut().set_weight(RigChannel::Head, 0.25, 0.3);
    tick(&mut host, &mut character);
    tick(&mut host, &mut character);
    assert!(character.rig().weight(RigChannel::Head) > 0.25);
    tick(&mut host, &mut character);

    assert_eq!(character.rig().weight(RigChannel::Head), 0.25);
    assert_eq!(host.rig.weight(RigChannel::Head), 0.25);

    // Keeps delivering the endpoint
    for _ in 0..5 {
        tick(&mut host, &mut character);
        assert_eq!(host.rig.weight(RigChannel::Head), 0.25);
    }
}

#[test]
fn zero_duration_weight_applies_on_next_tick() {
    let (mut host, mut character) = setup();
    character.rig_mut().set_weight(RigSelector::All, -4.0, 0.0);

    // Not applied until the rig runs
    assert_eq!(character.rig().weight(RigChannel::ArmRight), 1.0);
    tick(&mut host, &mut character);

    for channel in RigChannel::ALL {
        assert_eq!(character.rig().weight(channel), 0.0);
        assert_eq!(host.rig.weight(channel), 0.0);
    }
}

#[test]
fn untrack_fades_out_and_returns_source_to_origin() {
    let (mut host, mut character) = setup();
    let target = host.scene.spawn_target(Vec3::new(1.0, 1.2, 1.5));

    character
        .rig_mut()
        .track_object_with_weight(&mut host, RigChannel::ArmLeft, target, 1.0, 0.3);
    for _ in 0..2 {
        tick(&mut host, &mut character);
    }
    let origin = character.rig().channel(RigChannel::ArmLeft).origin();
    assert_ne!(host.rig.source_local_position(RigChannel::ArmLeft), origin);

    character.rig_mut().untrack_object(&mut host, RigChannel::ArmLeft);
    assert_eq!(host.rig.source_local_position(RigChannel::ArmLeft), origin);

    let mut weights = vec![character.rig().weight(RigChannel::ArmLeft)];
    for _ in 0..4 {
        tick(&mut host, &mut character);
        weights.push(character.rig().weight(RigChannel::ArmLeft));
    }

    assert!(weights.windows(2).all(|w| w[1] <= w[0]), "{weights:?}");
    assert_eq!(weights[2], 0.0, "zero within 0.2s: {weights:?}");
    assert_eq!(host.rig.source_local_position(RigChannel::ArmLeft), origin);
    assert!(!character.rig().channel(RigChannel::ArmLeft).is_tracking());
    assert_eq!(
        character.rig().channel(RigChannel::ArmLeft).last_sampled(),
        Vec3::ZERO
    );
}

#[test]
fn drift_below_threshold_does_not_move_source() {
    let (mut host, mut character) = setup();
    let target = target_on_head(&mut host);
    let start = head_source(&host);

    character
        .rig_mut()
        .track_object(&mut host, RigChannel::Head, target, 0.3);
    tick(&mut host, &mut character);
    assert_eq!(character.rig().pending_source_moves(), 0);

    // 0.03 < 0.05
    host.scene.move_target(target, start + Vec3::new(0.03, 0.0, 0.0));
    tick(&mut host, &mut character);
    tick(&mut host, &mut character);
    assert_eq!(character.rig().pending_source_moves(), 0);
    assert_eq!(head_source(&host), start);

    // Cumulative 0.06 > 0.05
    let end = start + Vec3::new(0.06, 0.0, 0.0);
    host.scene.move_target(target, end);
    tick(&mut host, &mut character);
    assert_eq!(character.rig().pending_source_moves(), 1);
    assert_eq!(head_source(&host), start);

    // The launched move starts from where the source was
    tick(&mut host, &mut character);
    let expected = start.lerp(end, 1.0 / 3.0);
    assert!(head_source(&host).distance(expected) < 1e-4);
}

#[test]
fn moved_target_triggers_one_delayed_follow() {
    let (mut host, mut character) = setup();
    let target = target_on_head(&mut host);

    character.rig_mut().track_object_with_weight(
        &mut host,
        RigChannel::Head,
        target,
        1.0,
        RigController::TRACK_DELAY,
    );
    tick(&mut host, &mut character);
    assert_eq!(character.rig().pending_source_moves(), 0);

    // 0.1s later the target jumps one unit
    let moved = head_source(&host) + Vec3::X;
    host.scene.move_target(target, moved);
    tick(&mut host, &mut character);
    assert_eq!(character.rig().pending_source_moves(), 1);
    assert!(character.rig().is_moving_source(RigChannel::Head));

    // In flight for 0.3s, no relaunch
    tick(&mut host, &mut character);
    tick(&mut host, &mut character);
    assert_eq!(character.rig().pending_source_moves(), 1);
    assert_ne!(head_source(&host), moved);

    tick(&mut host, &mut character);
    assert_eq!(head_source(&host), moved);
    assert_eq!(character.rig().pending_source_moves(), 0);

    tick(&mut host, &mut character);
    assert_eq!(character.rig().pending_source_moves(), 0);
    assert_eq!(head_source(&host), moved);
}

#[test]
fn newer_move_supersedes_older_one() {
    let (mut host, mut character) = setup();
    let first = host.scene.spawn_target(Vec3::new(2.0, 1.6, 2.0));
    let second = host.scene.spawn_target(Vec3::new(-2.0, 1.6, 2.0));

    character
        .rig_mut()
        .target_override(&mut host, RigChannel::Head, first, 1.0)
        .expect("first target exists");
    tick(&mut host, &mut character);
    character
        .rig_mut()
        .target_override(&mut host, RigChannel::Head, second, 0.2)
        .expect("second target exists");

    for _ in 0..10 {
        tick(&mut host, &mut character);
    }
    assert_eq!(head_source(&host), Vec3::new(-2.0, 1.6, 2.0));
    assert_eq!(character.rig().channel(RigChannel::Head).target(), Some(second));
}
