use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::climb::*;
use super::input::{
    JumpAction, JumpHeld, JumpPressed, LookAction, LookInput, MoveAction, MoveInput,
    clear_look_input, handle_jump_end, handle_jump_start, handle_look_input, handle_move_end,
    handle_move_input,
};
use super::jump::*;
use super::messages::*;
use super::movement::*;
use super::state::*;
use crate::climb::ClimbController;
use crate::physics::GameLayer;
use crate::settings::Settings;

/// Plugin for the third-person climbing player controller
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EnhancedInputPlugin);

        // Register input context for player
        app.add_input_context::<Player>();

        app.add_message::<ClimbMessage>();

        // Input observers
        app.add_observer(handle_move_input);
        app.add_observer(handle_move_end);
        app.add_observer(handle_look_input);
        app.add_observer(handle_jump_start);
        app.add_observer(handle_jump_end);

        // Fixed update systems for physics
        app.add_systems(
            FixedUpdate,
            (
                update_grounded_state,
                tick_climbers,
                handle_climb_action,
                variable_jump_height,
                ground_movement,
                air_movement,
                orient_to_movement,
                apply_gravity,
                advance_motion_tasks,
                apply_velocity,
            )
                .chain(),
        );

        app.add_systems(Update, (apply_control_yaw, log_climb_messages));

        // Clear look input at end of frame (jump is consumed in FixedUpdate)
        app.add_systems(Last, clear_look_input);
    }
}

/// Spawns a player body with climbing, input bindings and physics at `position`.
pub fn spawn_player(commands: &mut Commands, settings: Settings, position: Vec3) -> Entity {
    let config = settings.player;
    let capsule_length = (config.half_height - config.radius) * 2.0;

    commands
        .spawn((
            Player,
            config,
            settings.climb,
            ClimbController::default(),
            PlayerVelocity::default(),
            Locomotion::default(),
            MotionTask::default(),
            ControlYaw::default(),
        ))
        .insert((
            // Input state
            MoveInput::default(),
            LookInput::default(),
            JumpPressed::default(),
            JumpHeld::default(),
        ))
        .insert((
            // Physics - Dynamic body with locked rotation, let Avian handle collisions
            RigidBody::Dynamic,
            Collider::capsule(config.radius, capsule_length.max(0.1)),
            CollisionLayers::new(GameLayer::Player, [GameLayer::World]),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            TranslationInterpolation,
            Friction::new(0.0),    // No friction - we handle movement ourselves
            Restitution::new(0.0), // No bounce
            GravityScale(0.0),     // We handle gravity ourselves for more control
        ))
        .insert((
            // Transform
            Transform::from_translation(position),
            Visibility::default(),
        ))
        .insert(
            // Input bindings
            actions!(Player[
                (
                    Action::<MoveAction>::new(),
                    bindings![
                        (KeyCode::KeyW, SwizzleAxis::YXZ),
                        (KeyCode::KeyS, SwizzleAxis::YXZ, Negate::all()),
                        KeyCode::KeyD,
                        (KeyCode::KeyA, Negate::all()),
                    ],
                ),
                (
                    Action::<LookAction>::new(),
                    bindings![
                        Binding::mouse_motion(),
                    ],
                ),
                (
                    Action::<JumpAction>::new(),
                    bindings![KeyCode::Space, GamepadButton::South],
                ),
            ]),
        )
        .id()
}
