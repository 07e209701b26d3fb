pub mod climb;
pub mod physics;
pub mod player;
pub mod settings;

pub use physics::PhysicsPlugin;
pub use player::PlayerPlugin;
pub use settings::{Settings, SettingsError};

use bevy::prelude::*;

/// Unified plugin that adds physics and the climbing player controller.
pub struct ClimbSystemPlugin;

impl Plugin for ClimbSystemPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<PhysicsPlugin>() {
            app.add_plugins(PhysicsPlugin);
        }
        if !app.is_plugin_added::<PlayerPlugin>() {
            app.add_plugins(PlayerPlugin);
        }
    }
}

pub mod prelude {
    pub use crate::climb::{
        ClimbConfig, ClimbController, ClimbEvent, ClimbPhase, DetachReason, LocomotionMode,
    };
    pub use crate::physics::{GameLayer, PhysicsPlugin};
    pub use crate::player::{
        ClimbMessage, ControlYaw, Grounded, Locomotion, Player, PlayerConfig, PlayerPlugin,
        PlayerVelocity, spawn_player,
    };
    pub use crate::settings::{Settings, SettingsError};
    pub use crate::ClimbSystemPlugin;
}
