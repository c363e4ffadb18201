//! Procedural rig blending and target tracking.
//!
//! Three channels (head look, left arm, right arm) each carry a blend weight
//! and a source point. Weights and source moves are driven by tweens keyed by
//! channel, so a new request on a channel supersedes the running one.
//! Tracking is reactive: a source only moves once its target has drifted past
//! the channel's threshold since the last move was launched.
mod channel;
mod controller;
mod error;

pub use channel::{ChannelState, RigChannel, RigSelector};
pub use controller::RigController;
pub use error::RigError;

/// Clamps a blend weight to `[0, 1]`; NaN becomes 0.
pub(crate) fn clamp01(weight: f32) -> f32 {
    if weight.is_nan() {
        0.0
    } else {
        weight.clamp(0.0, 1.0)
    }
}
