//! Animation evaluator interface.

/// Animator parameters written by the character core.
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
    strum::AsRefStr,
    strum::EnumIter,
)]
pub enum AnimParam {
    /// Blended horizontal speed (float).
    Speed,
    /// Input magnitude, 1 for digital input (float).
    MotionSpeed,
    /// Grounded probe result (bool).
    Grounded,
    /// Jump impulse issued this tick (bool).
    Jump,
    /// Airborne past the fall timeout (bool).
    FreeFall,
}

/// Skinned animation evaluator whose output the rigs override.
pub trait Animator {
    fn set_float(&mut self, param: AnimParam, value: f32);

    fn set_bool(&mut self, param: AnimParam, value: bool);

    /// Enables or disables evaluation. A disabled animator leaves bones alone.
    fn set_enabled(&mut self, enabled: bool);

    fn is_enabled(&self) -> bool;

    /// Returns true if the base layer's current state is named `state`.
    fn is_playing(&self, state: &str) -> bool;

    /// Starts `clip` on the base layer from its first frame.
    fn play(&mut self, clip: &str);
}
