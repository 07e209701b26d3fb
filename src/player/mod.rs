mod climb;
pub mod input;
mod jump;
mod messages;
mod movement;
mod plugin;
mod state;

pub use climb::{CharacterBody, advance_motion_tasks, handle_climb_action, tick_climbers};
pub use input::{JumpHeld, JumpPressed, LookInput, MoveInput};
pub use jump::{jump_impulse, variable_jump_height};
pub use messages::{ClimbMessage, log_climb_messages};
pub use movement::{
    air_movement, apply_control_yaw, apply_gravity, apply_velocity, ground_movement,
    orient_to_movement, update_grounded_state,
};
pub use plugin::{PlayerPlugin, spawn_player};
pub use state::*;
