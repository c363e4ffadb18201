use std::collections::BTreeMap;

use super::{BehaviorState, StateContext, StateError, StateHandler, Transition};
use crate::error::CharacterError;

/// Registers handlers before the manager is built.
#[derive(Default)]
pub struct StateManagerBuilder {
    handlers: Vec<(BehaviorState, Box<dyn StateHandler>)>,
}

impl StateManagerBuilder {
    pub fn register(mut self, state: BehaviorState, handler: impl StateHandler) -> Self {
        self.handlers.push((state, Box::new(handler)));
        self
    }

    /// Builds the manager and runs `on_load` once per handler, in registration order.
    ///
    /// No state is entered yet.
    pub fn build(self, ctx: &mut StateContext<'_>) -> Result<StateManager, CharacterError> {
        let mut order = Vec::with_capacity(self.handlers.len());
        let mut handlers = BTreeMap::new();
        for (state, handler) in self.handlers {
            if handlers.insert(state, handler).is_some() {
                return Err(StateError::DuplicateHandler(state).into());
            }
            order.push(state);
        }

        for state in order {
            if let Some(handler) = handlers.get_mut(&state) {
                handler.on_load(ctx)?;
            }
        }

        Ok(StateManager {
            handlers,
            current: None,
        })
    }
}

/// Owns the state handlers and the current state.
pub struct StateManager {
    handlers: BTreeMap<BehaviorState, Box<dyn StateHandler>>,
    current: Option<BehaviorState>,
}

impl StateManager {
    pub fn builder() -> StateManagerBuilder {
        StateManagerBuilder::default()
    }

    /// `None` until the first transition.
    pub fn current(&self) -> Option<BehaviorState> {
        self.current
    }

    pub fn compare_current_state(&self, state: BehaviorState) -> bool {
        self.current == Some(state)
    }

    pub fn is_registered(&self, state: BehaviorState) -> bool {
        self.handlers.contains_key(&state)
    }

    /// Leaves the current state and enters `target`.
    ///
    /// Entering the current state again does nothing.
    pub fn set_state(
        &mut self,
        ctx: &mut StateContext<'_>,
        target: BehaviorState,
    ) -> Result<(), CharacterError> {
        if !self.is_registered(target) {
            tracing::error!("transition to unregistered state {} rejected", target);
            return Err(StateError::Unregistered(target).into());
        }
        if self.current == Some(target) {
            return Ok(());
        }

        let previous = self.current;
        if let Some(handler) = previous.and_then(|state| self.handlers.get_mut(&state)) {
            handler.on_exit(ctx)?;
        }

        self.current = Some(target);
        if let Some(handler) = self.handlers.get_mut(&target) {
            handler.on_enter(ctx)?;
        }

        match previous {
            Some(previous) => tracing::debug!("state {} -> {}", previous, target),
            None => tracing::debug!("state entered {}", target),
        }
        Ok(())
    }

    /// Runs the current state's update and applies the transition it asks for.
    pub fn update(&mut self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        let Some(handler) = self.current.and_then(|state| self.handlers.get_mut(&state)) else {
            return Ok(());
        };

        match handler.on_update(ctx)? {
            Transition::Stay => Ok(()),
            Transition::To(next) => self.set_state(ctx, next),
        }
    }

    /// Runs `on_destroy` on every handler, current or not.
    ///
    /// Every handler is visited even if one fails; the first error is returned.
    pub fn destroy(&mut self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        let mut first_error = None;
        for (state, handler) in &mut self.handlers {
            if let Err(err) = handler.on_destroy(ctx) {
                tracing::error!("destroying {} failed: {}", state, err);
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
        self.current = None;

        first_error.map_or(Ok(()), Err)
    }

    /// Typed access to the handler registered for `state`.
    pub fn handler_mut<T: StateHandler>(&mut self, state: BehaviorState) -> Option<&mut T> {
        self.handlers
            .get_mut(&state)?
            .as_any_mut()
            .downcast_mut::<T>()
    }
}

impl core::fmt::Debug for StateManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StateManager")
            .field("registered", &self.handlers.keys().collect::<Vec<_>>())
            .field("current", &self.current)
            .finish()
    }
}
