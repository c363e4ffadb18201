use glam::Vec3;
use tween::{Scheduler, Tween};

use super::{ChannelState, RigChannel, RigError, RigSelector, clamp01};
use crate::config::RigConfig;
use crate::host::{CharacterHost, RigSurface, TargetId};

/// Owns the three rig channels and the tweens driving them.
///
/// Weight changes take effect on the next [`update`](Self::update), which is
/// also where weights are pushed to the [`RigSurface`]. Operations that
/// reposition sources reach the surface through the host immediately.
#[derive(Clone, Debug)]
pub struct RigController {
    channels: [ChannelState; 3],
    weights: Scheduler<RigChannel, f32>,
    sources: Scheduler<RigChannel, Vec3>,
}

impl RigController {
    /// Default blend time of [`set_weight`](Self::set_weight).
    pub const BLEND_TIME: f32 = 0.3;
    /// Weight blend used by track, untrack and override requests.
    pub const TRACK_BLEND_TIME: f32 = 0.2;
    /// Default reactive move duration of a track request.
    pub const TRACK_DELAY: f32 = 0.3;
    /// Default duration of an override move.
    pub const OVERRIDE_DELAY: f32 = 0.4;

    /// Builds the controller, capturing every source's current local position
    /// as its origin.
    pub fn load(config: &RigConfig, rig: &dyn RigSurface) -> Self {
        let channels = RigChannel::ALL
            .map(|channel| ChannelState::new(config.channel(channel), rig.source_local_position(channel)));

        Self {
            channels,
            weights: Scheduler::new(),
            sources: Scheduler::new(),
        }
    }

    pub fn channel(&self, channel: RigChannel) -> &ChannelState {
        &self.channels[channel.index()]
    }

    pub fn weight(&self, channel: RigChannel) -> f32 {
        self.channel(channel).weight
    }

    /// Returns `true` while a weight tween is running on `channel`.
    pub fn is_blending(&self, channel: RigChannel) -> bool {
        self.weights.is_running(channel)
    }

    /// Returns `true` while a source move is running on `channel`.
    pub fn is_moving_source(&self, channel: RigChannel) -> bool {
        self.sources.is_running(channel)
    }

    /// Number of source moves in flight across all channels.
    pub fn pending_source_moves(&self) -> usize {
        self.sources.live_count()
    }

    /// Blends the selected channels to `weight` over `duration` seconds.
    pub fn set_weight(&mut self, selector: impl Into<RigSelector>, weight: f32, duration: f32) {
        for &channel in selector.into().channels() {
            self.blend_to(channel, weight, duration);
        }
    }

    /// Starts reactive tracking of `target` without touching the weight.
    ///
    /// Each later move toward the target lasts `delay` seconds.
    pub fn track_object(
        &mut self,
        host: &mut dyn CharacterHost,
        selector: impl Into<RigSelector>,
        target: TargetId,
        delay: f32,
    ) {
        for &channel in selector.into().channels() {
            self.begin_tracking(host, channel, target, delay);
        }
    }

    /// Starts reactive tracking of `target` and blends toward `weight`.
    pub fn track_object_with_weight(
        &mut self,
        host: &mut dyn CharacterHost,
        selector: impl Into<RigSelector>,
        target: TargetId,
        weight: f32,
        delay: f32,
    ) {
        for &channel in selector.into().channels() {
            self.blend_to(channel, weight, Self::TRACK_BLEND_TIME);
            self.begin_tracking(host, channel, target, delay);
        }
    }

    /// Stops tracking, fades the weight out and puts the source back at its origin.
    pub fn untrack_object(&mut self, host: &mut dyn CharacterHost, selector: impl Into<RigSelector>) {
        for &channel in selector.into().channels() {
            self.blend_to(channel, 0.0, Self::TRACK_BLEND_TIME);
            self.reset_source(host, channel);
            self.channels[channel.index()].last_sampled = Vec3::ZERO;
        }
    }

    /// Moves the selected sources once onto `target` over `delay` seconds.
    ///
    /// The target is recorded but not followed afterwards.
    pub fn target_override(
        &mut self,
        host: &mut dyn CharacterHost,
        selector: impl Into<RigSelector>,
        target: TargetId,
        delay: f32,
    ) -> Result<(), RigError> {
        let end = Self::resolve(host, target)?;
        for &channel in selector.into().channels() {
            self.override_source(host, channel, target, end, delay);
        }
        Ok(())
    }

    /// [`target_override`](Self::target_override) plus a blend toward `weight`.
    pub fn target_override_with_weight(
        &mut self,
        host: &mut dyn CharacterHost,
        selector: impl Into<RigSelector>,
        target: TargetId,
        weight: f32,
        delay: f32,
    ) -> Result<(), RigError> {
        let end = Self::resolve(host, target)?;
        for &channel in selector.into().channels() {
            self.blend_to(channel, weight, Self::TRACK_BLEND_TIME);
            self.override_source(host, channel, target, end, delay);
        }
        Ok(())
    }

    /// Fades every channel to zero over `reset_duration` and drops all tracking.
    ///
    /// Sources snap back to their origins immediately.
    pub fn discard_all_overrides(&mut self, host: &mut dyn CharacterHost, reset_duration: f32) {
        for channel in RigChannel::ALL {
            let current = self.channels[channel.index()].weight;
            self.weights
                .start(channel, Tween::weight(current, 0.0, reset_duration));
            self.reset_source(host, channel);
        }
        tracing::debug!("rig overrides discarded over {}s", reset_duration);
    }

    /// Advances tweens, pushes weights to the rig, then runs reactive tracking.
    pub fn update(&mut self, host: &mut dyn CharacterHost, dt: f32) {
        let channels = &mut self.channels;
        self.weights
            .advance(dt, |channel, weight| channels[channel.index()].weight = weight);

        let rig = host.rig();
        self.sources
            .advance(dt, |channel, position| rig.set_source_position(channel, position));
        for channel in RigChannel::ALL {
            rig.set_weight(channel, self.channels[channel.index()].weight);
        }

        for channel in RigChannel::ALL {
            self.react(host, channel);
        }
    }

    fn react(&mut self, host: &mut dyn CharacterHost, channel: RigChannel) {
        let state = &mut self.channels[channel.index()];
        let Some(target) = state.target.filter(|_| state.tracking) else {
            return;
        };

        let Some(position) = host.scene().target_position(target) else {
            tracing::warn!(
                "{} lost its tracked {}; tracking stopped",
                channel,
                target
            );
            state.clear_tracking();
            return;
        };

        if (position - state.last_sampled).length() <= state.reaction_threshold {
            return;
        }

        let start = host.rig().source_position(channel);
        state.last_sampled = position;
        self.sources
            .start(channel, Tween::new(start, position, state.tracking_delay));
        tracing::debug!(
            "{} reacting to {}: {} -> {} over {}s",
            channel,
            target,
            start,
            position,
            state.tracking_delay
        );
    }

    fn blend_to(&mut self, channel: RigChannel, weight: f32, duration: f32) {
        let target = clamp01(weight);
        let current = self.channels[channel.index()].weight;
        if current == target {
            // Already there; drop any blend heading elsewhere
            self.weights.cancel(channel);
            return;
        }
        self.weights
            .start(channel, Tween::weight(current, target, duration));
    }

    fn begin_tracking(
        &mut self,
        host: &mut dyn CharacterHost,
        channel: RigChannel,
        target: TargetId,
        delay: f32,
    ) {
        let source = host.rig().source_position(channel);
        let state = &mut self.channels[channel.index()];
        state.last_sampled = source;
        state.target = Some(target);
        state.tracking_delay = delay;
        state.tracking = true;
        tracing::debug!("{} tracking {} after {}s", channel, target, delay);
    }

    fn override_source(
        &mut self,
        host: &mut dyn CharacterHost,
        channel: RigChannel,
        target: TargetId,
        end: Vec3,
        delay: f32,
    ) {
        let start = host.rig().source_position(channel);
        let state = &mut self.channels[channel.index()];
        state.target = Some(target);
        state.tracking = false;
        self.sources.start(channel, Tween::new(start, end, delay));
        tracing::debug!("{} overridden toward {} over {}s", channel, target, delay);
    }

    fn reset_source(&mut self, host: &mut dyn CharacterHost, channel: RigChannel) {
        let state = &mut self.channels[channel.index()];
        state.clear_tracking();
        self.sources.cancel(channel);
        host.rig().set_source_local_position(channel, state.origin);
    }

    fn resolve(host: &dyn CharacterHost, target: TargetId) -> Result<Vec3, RigError> {
        host.scene().target_position(target).ok_or_else(|| {
            tracing::warn!("override rejected: {} is not in the scene", target);
            RigError::TargetNotFound(target)
        })
    }
}
