//! Behavior state machine.
//!
//! A character is always in at most one [`BehaviorState`]. Each registered
//! state has one [`StateHandler`] instance that lives as long as the
//! character; the [`StateManager`] owns them and serializes every transition
//! as exit-then-enter.
//!
//! Handlers never hold a reference back to their owner. Every hook receives a
//! [`StateContext`] with the host, the rig controller, the shared motor state,
//! the latest input and the configuration.
mod controllable;
mod error;
mod manager;
mod ragdoll;
mod recovering;

use core::any::Any;

pub use controllable::ControllableState;
pub use error::{RagdollError, StateError};
pub use manager::{StateManager, StateManagerBuilder};
pub use ragdoll::RagdollState;
pub use recovering::RecoveringState;

use crate::config::CharacterConfig;
use crate::error::CharacterError;
use crate::host::CharacterHost;
use crate::input::InputSnapshot;
use crate::rig::RigController;

/// Mutually exclusive behavior modes.
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
    strum::EnumIter,
    strum::EnumCount,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorState {
    /// Player-driven movement.
    Controllable,
    /// Reserved; no handler exists for it.
    Wild,
    /// Physics owns the body.
    Ragdoll,
    /// Scripted stand-up after a ragdoll.
    Recovering,
}

/// What a state asks the manager to do after its update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Transition {
    #[default]
    Stay,
    To(BehaviorState),
}

/// Motion state shared between states across ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotorState {
    /// Result of the last grounded probe.
    pub grounded: bool,
}

impl Default for MotorState {
    fn default() -> Self {
        Self { grounded: true }
    }
}

/// Everything a state hook may touch during one call.
pub struct StateContext<'a> {
    pub host: &'a mut dyn CharacterHost,
    pub rig: &'a mut RigController,
    pub motor: &'a mut MotorState,
    pub input: &'a mut InputSnapshot,
    pub config: &'a CharacterConfig,
    /// Seconds since the previous tick; zero outside of updates.
    pub dt: f32,
}

/// Lifecycle hooks of one behavior state.
///
/// `on_load` runs once when the manager is built, `on_destroy` once when it is
/// torn down. `on_enter`/`on_exit` bracket every stay in the state and
/// `on_update` runs once per tick while the state is current.
pub trait StateHandler: Any {
    fn on_load(&mut self, _ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        Ok(())
    }

    fn on_enter(&mut self, _ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        Ok(())
    }

    fn on_update(&mut self, _ctx: &mut StateContext<'_>) -> Result<Transition, CharacterError> {
        Ok(Transition::Stay)
    }

    fn on_exit(&mut self, _ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        Ok(())
    }

    fn on_destroy(&mut self, _ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        Ok(())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
