use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Climbing configuration
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimbConfig {
    /// Length of the pelvis and head probe rays
    pub probe_distance: f32,
    /// Standoff distance kept from the climbed surface
    pub wall_offset: f32,
    /// Delay between the jump and climb initiation, in seconds
    pub climb_delay: f32,
    /// Duration of the interpolated move onto the wall, in seconds
    pub attach_duration: f32,
    /// Climbing speed along the wall in m/s
    pub climb_speed: f32,
    /// Largest change in surface normal followed while climbing, in radians.
    /// Sharper corners stop the climber.
    pub max_surface_turn: f32,
}

impl Default for ClimbConfig {
    fn default() -> Self {
        Self {
            probe_distance: 2.0,
            wall_offset: 0.5,
            climb_delay: 0.1,
            attach_duration: 0.4,
            climb_speed: 2.0,
            max_surface_turn: 45.0_f32.to_radians(),
        }
    }
}
