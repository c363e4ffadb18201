//! Tick-driven interpolation for procedural animation.
//!
//! This library provides the two easing primitives the character core needs
//! (scalar weights and 3D positions) and a small scheduler that polls them once
//! per simulation tick.
//!
//! - **Explicit time**: every step receives its delta time from the caller
//! - **No hidden runtime**: tasks live in a [`Scheduler`] owned by the simulation
//! - **Superseding**: starting a tween on a key retires the one already running
//! - **Clamped completion**: the final step always delivers the exact end value
//!
//! # Architecture
//!
//! - [`Lerp`]: values that can be linearly interpolated
//! - [`Tween`]: a single start → end interpolation over a duration
//! - [`Step`]: value produced by one tween step (running or finished)
//! - [`Scheduler`]: keyed task list with generation counters

pub mod lerp;
pub mod scheduler;
pub mod step;
pub mod tween;

// Re-export core types for ergonomic API
pub use lerp::Lerp;
pub use scheduler::{Scheduler, TaskHandle};
pub use step::Step;
pub use tween::{COMPLETION_EPSILON, Tween};
