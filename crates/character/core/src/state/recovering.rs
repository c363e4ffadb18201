use core::any::Any;

use super::{BehaviorState, StateContext, StateHandler, Transition};
use crate::error::CharacterError;

/// Waits for the stand-up animation to hand back to idle.
///
/// There is no timeout: the state polls until the animator reports the idle
/// state, logging a single warning if that takes suspiciously long.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecoveringState {
    waited: f32,
    warned: bool,
}

impl RecoveringState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds spent in the current recovery.
    pub fn waited(&self) -> f32 {
        self.waited
    }
}

impl StateHandler for RecoveringState {
    fn on_enter(&mut self, _ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        self.waited = 0.0;
        self.warned = false;
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut StateContext<'_>) -> Result<Transition, CharacterError> {
        let recovery = &ctx.config.recovery;
        if ctx.host.animator().is_playing(&recovery.idle_state) {
            tracing::debug!("recovered after {:.2}s", self.waited);
            return Ok(Transition::To(BehaviorState::Controllable));
        }

        self.waited += ctx.dt.max(0.0);
        if !self.warned && self.waited > recovery.stall_warning_after {
            self.warned = true;
            tracing::warn!(
                "still waiting for animator state {:?} after {:.1}s",
                recovery.idle_state,
                self.waited
            );
        }
        Ok(Transition::Stay)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
