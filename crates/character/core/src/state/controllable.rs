use core::any::Any;

use glam::Vec3;

use super::{StateContext, StateHandler, Transition};
use crate::error::CharacterError;
use crate::host::AnimParam;

/// Player-driven movement: gravity and jumping, then horizontal motion, then
/// the grounded probe, once per tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControllableState {
    speed: f32,
    animation_blend: f32,
    target_rotation: f32,
    rotation_velocity: f32,
    vertical_velocity: f32,
    jump_timeout_delta: f32,
    fall_timeout_delta: f32,
}

impl ControllableState {
    /// Vertical velocity held while standing, keeps the controller pressed to the ground.
    pub const GROUNDED_VERTICAL_VELOCITY: f32 = -2.0;
    /// Band around the target speed inside which speed snaps instead of easing.
    pub const SPEED_OFFSET: f32 = 0.1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Horizontal speed chosen on the last tick.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn animation_blend(&self) -> f32 {
        self.animation_blend
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Facing the character is turning toward, in degrees.
    pub fn target_rotation(&self) -> f32 {
        self.target_rotation
    }

    fn jump_and_gravity(&mut self, ctx: &mut StateContext<'_>) {
        let config = &ctx.config.locomotion;
        let dt = ctx.dt;
        let animator = ctx.host.animator();

        if ctx.motor.grounded {
            self.fall_timeout_delta = config.fall_timeout;
            animator.set_bool(AnimParam::Jump, false);
            animator.set_bool(AnimParam::FreeFall, false);

            if self.vertical_velocity < 0.0 {
                self.vertical_velocity = Self::GROUNDED_VERTICAL_VELOCITY;
            }

            if ctx.input.jump && self.jump_timeout_delta <= 0.0 {
                self.vertical_velocity = (config.jump_height * -2.0 * config.gravity).max(0.0).sqrt();
                animator.set_bool(AnimParam::Jump, true);
            }

            if self.jump_timeout_delta >= 0.0 {
                self.jump_timeout_delta -= dt;
            }
        } else {
            self.jump_timeout_delta = config.jump_timeout;

            if self.fall_timeout_delta >= 0.0 {
                self.fall_timeout_delta -= dt;
            } else {
                animator.set_bool(AnimParam::FreeFall, true);
            }

            ctx.input.jump = false;
        }

        if self.vertical_velocity < config.terminal_velocity {
            self.vertical_velocity += config.gravity * dt;
        }
    }

    fn move_character(&mut self, ctx: &mut StateContext<'_>) {
        let config = &ctx.config.locomotion;
        let dt = ctx.dt;
        let input = *ctx.input;

        let mut target_speed = if input.sprint {
            config.sprint_speed
        } else {
            config.move_speed
        };
        if !input.has_move() {
            target_speed = 0.0;
        }

        let velocity = ctx.host.locomotion().velocity();
        let current_speed = Vec3::new(velocity.x, 0.0, velocity.z).length();
        let input_magnitude = input.move_magnitude();
        let t = (dt * config.speed_change_rate).clamp(0.0, 1.0);

        if current_speed < target_speed - Self::SPEED_OFFSET
            || current_speed > target_speed + Self::SPEED_OFFSET
        {
            let eased = lerp(current_speed, target_speed * input_magnitude, t);
            self.speed = (eased * 1000.0).round() / 1000.0;
        } else {
            self.speed = target_speed;
        }

        self.animation_blend = lerp(self.animation_blend, target_speed, t);
        if self.animation_blend < 0.01 {
            self.animation_blend = 0.0;
        }

        if input.has_move() {
            let camera_yaw = ctx.host.scene().camera_yaw();
            self.target_rotation =
                input.move_axis.x.atan2(input.move_axis.y).to_degrees() + camera_yaw;

            let locomotion = ctx.host.locomotion();
            let rotation = smooth_damp_angle(
                locomotion.yaw(),
                self.target_rotation,
                &mut self.rotation_velocity,
                config.rotation_smooth_time,
                dt,
            );
            locomotion.set_yaw(rotation);
        }

        let yaw = self.target_rotation.to_radians();
        let direction = Vec3::new(yaw.sin(), 0.0, yaw.cos());
        let displacement =
            direction * (self.speed * dt) + Vec3::new(0.0, self.vertical_velocity, 0.0) * dt;
        ctx.host.locomotion().move_by(displacement);

        let animator = ctx.host.animator();
        animator.set_float(AnimParam::Speed, self.animation_blend);
        animator.set_float(AnimParam::MotionSpeed, input_magnitude);
    }

    fn grounded_check(&mut self, ctx: &mut StateContext<'_>) {
        let grounding = &ctx.config.grounding;
        let root = ctx.host.locomotion().position();
        let center = Vec3::new(root.x, root.y - grounding.offset, root.z);

        let grounded = ctx
            .host
            .physics()
            .check_sphere(center, grounding.radius, grounding.layers);
        ctx.motor.grounded = grounded;
        ctx.host.animator().set_bool(AnimParam::Grounded, grounded);
    }
}

impl StateHandler for ControllableState {
    fn on_load(&mut self, ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        self.jump_timeout_delta = ctx.config.locomotion.jump_timeout;
        self.fall_timeout_delta = ctx.config.locomotion.fall_timeout;
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut StateContext<'_>) -> Result<Transition, CharacterError> {
        self.jump_and_gravity(ctx);
        self.move_character(ctx);
        self.grounded_check(ctx);
        Ok(Transition::Stay)
    }

    fn on_exit(&mut self, _ctx: &mut StateContext<'_>) -> Result<(), CharacterError> {
        self.animation_blend = 0.0;
        self.speed = 0.0;
        self.rotation_velocity = 0.0;
        Ok(())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Linear interpolation with `t` already clamped.
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Shortest signed difference between two angles in degrees, in `(-180, 180]`.
fn delta_angle(current: f32, target: f32) -> f32 {
    let delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Critically damped approach of `current` toward `target` (degrees), wrapping
/// through the shorter arc.
fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    if !(dt > 0.0) {
        return current;
    }

    let target = current + delta_angle(current, target);
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    // No overshoot
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt;
    }
    output
}
