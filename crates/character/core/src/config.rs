//! Character tuning constants and per-subsystem configuration.
//!
//! Every struct carries its defaults as associated constants and implements
//! [`Default`]. With the `serde` feature a partial document deserializes on top
//! of those defaults.

use crate::host::{Bone, LayerMask};
use crate::rig::RigChannel;

/// Complete configuration of one character.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CharacterConfig {
    pub locomotion: LocomotionConfig,
    pub grounding: GroundingConfig,
    pub rig: RigConfig,
    pub ragdoll: RagdollConfig,
    pub recovery: RecoveryConfig,
}

/// Free-movement tuning used by the controllable state.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LocomotionConfig {
    /// Walk speed in m/s.
    pub move_speed: f32,
    /// Sprint speed in m/s.
    pub sprint_speed: f32,
    /// How fast the character turns to face the movement direction, in seconds.
    pub rotation_smooth_time: f32,
    /// Acceleration and deceleration factor.
    pub speed_change_rate: f32,
    /// Jump apex height in meters.
    pub jump_height: f32,
    /// Character-specific gravity (negative is down).
    pub gravity: f32,
    /// Time that must pass on the ground before jumping again.
    pub jump_timeout: f32,
    /// Time in the air before the free-fall animation kicks in.
    pub fall_timeout: f32,
    /// Vertical speed cap while falling.
    pub terminal_velocity: f32,
}

impl LocomotionConfig {
    pub const DEFAULT_MOVE_SPEED: f32 = 2.0;
    pub const DEFAULT_SPRINT_SPEED: f32 = 5.335;
    pub const DEFAULT_ROTATION_SMOOTH_TIME: f32 = 0.12;
    pub const DEFAULT_SPEED_CHANGE_RATE: f32 = 10.0;
    pub const DEFAULT_JUMP_HEIGHT: f32 = 1.2;
    pub const DEFAULT_GRAVITY: f32 = -15.0;
    pub const DEFAULT_JUMP_TIMEOUT: f32 = 0.5;
    pub const DEFAULT_FALL_TIMEOUT: f32 = 0.15;
    pub const DEFAULT_TERMINAL_VELOCITY: f32 = 53.0;
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: Self::DEFAULT_MOVE_SPEED,
            sprint_speed: Self::DEFAULT_SPRINT_SPEED,
            rotation_smooth_time: Self::DEFAULT_ROTATION_SMOOTH_TIME,
            speed_change_rate: Self::DEFAULT_SPEED_CHANGE_RATE,
            jump_height: Self::DEFAULT_JUMP_HEIGHT,
            gravity: Self::DEFAULT_GRAVITY,
            jump_timeout: Self::DEFAULT_JUMP_TIMEOUT,
            fall_timeout: Self::DEFAULT_FALL_TIMEOUT,
            terminal_velocity: Self::DEFAULT_TERMINAL_VELOCITY,
        }
    }
}

/// Grounded probe geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GroundingConfig {
    /// Probe center sits this far below the root (negative raises it). Useful for rough ground.
    pub offset: f32,
    /// Probe sphere radius; should match the locomotion capsule radius.
    pub radius: f32,
    /// Layers that count as ground.
    pub layers: LayerMask,
}

impl GroundingConfig {
    pub const DEFAULT_OFFSET: f32 = -0.14;
    pub const DEFAULT_RADIUS: f32 = 0.28;
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            offset: Self::DEFAULT_OFFSET,
            radius: Self::DEFAULT_RADIUS,
            layers: LayerMask::GROUND,
        }
    }
}

/// Initial state of one rig channel.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChannelConfig {
    /// Blend weight at load, clamped to `[0, 1]`.
    pub weight: f32,
    /// Seconds a reactive move takes until a track request sets its own delay.
    pub tracking_delay: f32,
    /// Distance the target must drift before the source reacts.
    pub reaction_threshold: f32,
}

impl ChannelConfig {
    pub const DEFAULT_WEIGHT: f32 = 1.0;
    pub const DEFAULT_TRACKING_DELAY: f32 = 0.15;
    pub const DEFAULT_REACTION_THRESHOLD: f32 = 0.05;
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            weight: Self::DEFAULT_WEIGHT,
            tracking_delay: Self::DEFAULT_TRACKING_DELAY,
            reaction_threshold: Self::DEFAULT_REACTION_THRESHOLD,
        }
    }
}

/// Rig blend channels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RigConfig {
    pub head: ChannelConfig,
    pub arm_left: ChannelConfig,
    pub arm_right: ChannelConfig,
}

impl RigConfig {
    pub fn channel(&self, channel: RigChannel) -> &ChannelConfig {
        match channel {
            RigChannel::Head => &self.head,
            RigChannel::ArmLeft => &self.arm_left,
            RigChannel::ArmRight => &self.arm_right,
        }
    }
}

/// Physics takeover and hand-back.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RagdollConfig {
    /// Seconds used to fade rig weights out when the ragdoll takes over.
    pub override_reset_time: f32,
    /// Maximum downward probe when snapping the root back onto the ground.
    pub ground_probe_distance: f32,
    /// Layers the downward probe may hit.
    pub ground_layers: LayerMask,
    /// Bone the root is relocated to on exit.
    pub hip_bone: Bone,
    /// Bone whose facing decides the stand-up clip.
    pub orientation_bone: Bone,
    /// Clip played when the character lies face down.
    pub stand_up_front: String,
    /// Clip played for every other orientation.
    pub stand_up_back: String,
}

impl RagdollConfig {
    pub const DEFAULT_OVERRIDE_RESET_TIME: f32 = 0.2;
    pub const DEFAULT_GROUND_PROBE_DISTANCE: f32 = 2.0;
    pub const DEFAULT_STAND_UP_FRONT: &'static str = "StandUp-Front";
    pub const DEFAULT_STAND_UP_BACK: &'static str = "StandUp-Back";
}

impl Default for RagdollConfig {
    fn default() -> Self {
        Self {
            override_reset_time: Self::DEFAULT_OVERRIDE_RESET_TIME,
            ground_probe_distance: Self::DEFAULT_GROUND_PROBE_DISTANCE,
            ground_layers: LayerMask::GROUND,
            hip_bone: Bone::Hips,
            orientation_bone: Bone::Hips,
            stand_up_front: Self::DEFAULT_STAND_UP_FRONT.to_owned(),
            stand_up_back: Self::DEFAULT_STAND_UP_BACK.to_owned(),
        }
    }
}

/// Scripted stand-up.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecoveryConfig {
    /// Animator state that marks the end of the stand-up.
    pub idle_state: String,
    /// Seconds of waiting after which a stall warning is logged (once).
    pub stall_warning_after: f32,
}

impl RecoveryConfig {
    pub const DEFAULT_IDLE_STATE: &'static str = "Idle";
    pub const DEFAULT_STALL_WARNING_AFTER: f32 = 10.0;
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            idle_state: Self::DEFAULT_IDLE_STATE.to_owned(),
            stall_warning_after: Self::DEFAULT_STALL_WARNING_AFTER,
        }
    }
}
