//! Procedural override rig interface.

use glam::Vec3;

use crate::rig::RigChannel;

/// Per-channel override rigs layered on top of the animator.
///
/// Each channel has a weight (opacity of its override) and a source transform
/// the rig aims or reaches toward.
pub trait RigSurface {
    fn set_weight(&mut self, channel: RigChannel, weight: f32);

    /// World position of the channel's source.
    fn source_position(&self, channel: RigChannel) -> Vec3;

    fn set_source_position(&mut self, channel: RigChannel, position: Vec3);

    /// Position of the source relative to its parent.
    fn source_local_position(&self, channel: RigChannel) -> Vec3;

    fn set_source_local_position(&mut self, channel: RigChannel, position: Vec3);
}
