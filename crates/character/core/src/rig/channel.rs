use core::str::FromStr;

use glam::Vec3;

use crate::config::ChannelConfig;
use crate::host::TargetId;

/// A concrete rig channel.
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
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RigChannel {
    Head,
    ArmLeft,
    ArmRight,
}

static CHANNELS: [RigChannel; 3] = RigChannel::ALL;

impl RigChannel {
    pub const ALL: [RigChannel; 3] = [Self::Head, Self::ArmLeft, Self::ArmRight];

    /// Slot of this channel in per-channel arrays.
    pub const fn index(self) -> usize {
        match self {
            Self::Head => 0,
            Self::ArmLeft => 1,
            Self::ArmRight => 2,
        }
    }
}

/// Addresses one channel or fans out over all of them.
///
/// `All` only expands into concrete channels; it never names a slot itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RigSelector {
    One(RigChannel),
    All,
}

impl RigSelector {
    /// Concrete channels addressed by this selector.
    pub fn channels(self) -> &'static [RigChannel] {
        match self {
            Self::One(channel) => &CHANNELS[channel.index()..=channel.index()],
            Self::All => &CHANNELS,
        }
    }
}

impl From<RigChannel> for RigSelector {
    fn from(channel: RigChannel) -> Self {
        Self::One(channel)
    }
}

impl FromStr for RigSelector {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        RigChannel::from_str(s).map(Self::One)
    }
}

/// Mutable blend and tracking state of one channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelState {
    pub(crate) weight: f32,
    pub(crate) target: Option<TargetId>,
    pub(crate) tracking: bool,
    pub(crate) tracking_delay: f32,
    pub(crate) reaction_threshold: f32,
    pub(crate) origin: Vec3,
    pub(crate) last_sampled: Vec3,
}

impl ChannelState {
    pub(crate) fn new(config: &ChannelConfig, origin: Vec3) -> Self {
        Self {
            weight: super::clamp01(config.weight),
            target: None,
            tracking: false,
            tracking_delay: config.tracking_delay,
            reaction_threshold: config.reaction_threshold,
            origin,
            last_sampled: Vec3::ZERO,
        }
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    /// Reactive tracking only runs while a target is set.
    pub fn is_tracking(&self) -> bool {
        self.tracking && self.target.is_some()
    }

    pub fn tracking_delay(&self) -> f32 {
        self.tracking_delay
    }

    pub fn reaction_threshold(&self) -> f32 {
        self.reaction_threshold
    }

    /// Source local position captured at load.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Target position the last reactive move was aimed at.
    pub fn last_sampled(&self) -> Vec3 {
        self.last_sampled
    }

    pub(crate) fn clear_tracking(&mut self) {
        self.tracking = false;
        self.target = None;
    }
}
