use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::climb::{InterpolatedMove, LocomotionMode};

/// Marker component for the player entity (also used as input context)
#[derive(Component, Default)]
pub struct Player;

/// Player movement configuration
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Walking speed in m/s
    pub walk_speed: f32,
    /// Ground acceleration
    pub ground_accel: f32,
    /// Ground friction/deceleration
    pub ground_friction: f32,
    /// Air acceleration (reduced control)
    pub air_accel: f32,
    /// Jump impulse velocity
    pub jump_velocity: f32,
    /// Multiplier applied to upward velocity when jump is released early (0.0-1.0)
    pub jump_cut_multiplier: f32,
    /// Collider radius
    pub radius: f32,
    /// Collider half height, caps included
    pub half_height: f32,
    /// Head socket height above the body origin
    pub head_height: f32,
    /// Turn rate while rotation follows movement, in rad/s
    pub rotation_rate: f32,
    /// Look input to control yaw, in radians per input unit
    pub look_sensitivity: f32,
    /// Maximum horizontal speed (m/s), 0.0 = uncapped
    pub max_horizontal_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            ground_accel: 20.0,
            ground_friction: 20.0,
            air_accel: 7.0,
            jump_velocity: 7.0,
            jump_cut_multiplier: 0.5,
            radius: 0.42,
            half_height: 0.96,
            head_height: 0.7,
            rotation_rate: 500.0_f32.to_radians(),
            look_sensitivity: 0.003,
            max_horizontal_speed: 20.0,
        }
    }
}

/// Current player velocity
#[derive(Component, Default, Deref, DerefMut)]
pub struct PlayerVelocity(pub Vec3);

/// Marker: player is on the ground
#[derive(Component)]
#[component(storage = "SparseSet")]
pub struct Grounded;

/// Ground surface normal (set when grounded)
#[derive(Component)]
pub struct GroundNormal(pub Vec3);

/// Marker: variable jump height cut has been applied this jump
#[derive(Component)]
#[component(storage = "SparseSet")]
pub struct JumpCut;

/// Locomotion mode and rotation behavior of the body
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Locomotion {
    pub mode: LocomotionMode,
    /// Body turns toward its horizontal velocity
    pub rotation_follows_movement: bool,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self {
            mode: LocomotionMode::Ground,
            rotation_follows_movement: true,
        }
    }
}

/// Interpolated move currently driving the body's transform, if any
#[derive(Component, Default, Debug)]
pub struct MotionTask(pub Option<InterpolatedMove>);

/// Yaw of the control rotation that ground movement is relative to
#[derive(Component, Default, Deref, DerefMut)]
pub struct ControlYaw(pub f32);

impl ControlYaw {
    /// Horizontal forward and right axes of the control rotation.
    pub fn axes(&self) -> (Vec3, Vec3) {
        let rotation = Quat::from_rotation_y(self.0);
        (rotation * Vec3::NEG_Z, rotation * Vec3::X)
    }
}
