//! Behavior core of a controllable character.
//!
//! Two subsystems drive the character each tick:
//!
//! - [`state`]: a state machine over [`BehaviorState`] (free movement, ragdoll
//!   physics takeover, scripted recovery) running transition side effects on
//!   the host.
//! - [`rig`]: the procedural rig blender that fades head and arm overrides in
//!   and out and moves their sources toward tracked targets.
//!
//! Both talk to the engine exclusively through the [`host`] traits.
//! [`Character`] ties them together:
//!
//! ```
//! use character_core::{BehaviorState, Character, CharacterConfig, InputSnapshot};
//! use character_core::host::SandboxHost;
//!
//! let mut host = SandboxHost::humanoid();
//! let mut character = Character::load(CharacterConfig::default(), &mut host)?;
//!
//! character.add_force_uniform(&mut host, 200.0)?;
//! assert!(character.compare_current_state(BehaviorState::Ragdoll));
//!
//! character.tick(&mut host, InputSnapshot::default(), 1.0 / 60.0)?;
//! # Ok::<(), character_core::CharacterError>(())
//! ```
pub mod character;
pub mod config;
pub mod error;
pub mod host;
pub mod input;
pub mod orientation;
pub mod rig;
pub mod state;

pub use character::Character;
pub use config::{
    ChannelConfig, CharacterConfig, GroundingConfig, LocomotionConfig, RagdollConfig, RecoveryConfig,
    RigConfig,
};
pub use error::{CharacterError, ClassifiedError, ErrorSeverity};
pub use input::InputSnapshot;
pub use orientation::Orientation;
pub use rig::{RigChannel, RigController, RigError, RigSelector};
pub use state::{BehaviorState, RagdollError, StateError, Transition};
