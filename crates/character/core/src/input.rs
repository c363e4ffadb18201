//! Per-tick player input.

use glam::Vec2;

/// Input sampled by the host before each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputSnapshot {
    /// Movement stick; `y` is forward.
    pub move_axis: Vec2,
    pub look: Vec2,
    pub sprint: bool,
    /// Held jump request. Cleared by the character while airborne.
    pub jump: bool,
    /// When set, the stick magnitude scales the target speed.
    pub analog_movement: bool,
}

impl InputSnapshot {
    pub fn has_move(&self) -> bool {
        self.move_axis != Vec2::ZERO
    }

    /// Stick magnitude used to scale speed; digital input always counts as full.
    pub fn move_magnitude(&self) -> f32 {
        if self.analog_movement {
            self.move_axis.length()
        } else {
            1.0
        }
    }
}
