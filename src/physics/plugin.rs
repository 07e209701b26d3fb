use avian3d::prelude::*;
use bevy::prelude::*;

/// Standard gravity in m/s²
pub const GRAVITY: f32 = 9.81;

/// Plugin that sets up the Avian3D physics engine
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            PhysicsPlugins::default()
                .with_length_unit(1.0), // 1 unit = 1 meter
        );

        // Character gravity is applied by the player systems; this drives everything else.
        app.insert_resource(Gravity(Vec3::NEG_Y * GRAVITY));
    }
}
