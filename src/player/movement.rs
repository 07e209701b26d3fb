use avian3d::prelude::*;
use bevy::prelude::*;

use super::input::{LookInput, MoveInput};
use super::state::*;
use crate::climb::LocomotionMode;
use crate::physics::GameLayer;

/// Updates grounded state via raycast.
///
/// Ground-relative bodies switch between `Ground` and `Falling`; a climbing body keeps
/// its `Unconstrained` mode and is never grounded.
pub fn update_grounded_state(
    mut commands: Commands,
    spatial_query: SpatialQuery,
    mut query: Query<(
        Entity,
        &Transform,
        &PlayerConfig,
        &mut PlayerVelocity,
        &mut Locomotion,
        Has<Grounded>,
    )>,
) {
    let filter = SpatialQueryFilter::default().with_mask(GameLayer::World);

    for (entity, transform, config, mut player_vel, mut locomotion, was_grounded) in &mut query {
        if !locomotion.mode.is_ground_relative() {
            if was_grounded {
                commands.entity(entity).remove::<(Grounded, GroundNormal)>();
            }
            continue;
        }

        // Raycast from center of capsule downward
        let ground_check_dist = config.half_height + 0.1;
        let hit = spatial_query.cast_ray(
            transform.translation,
            Dir3::NEG_Y,
            ground_check_dist,
            true,
            &filter,
        );

        let ground = hit.filter(|h| h.distance < ground_check_dist && player_vel.y < 1.0);

        if let Some(hit) = ground {
            commands.entity(entity).insert(GroundNormal(hit.normal));
            if !was_grounded {
                commands.entity(entity).insert(Grounded).remove::<JumpCut>();
            }
            locomotion.mode = LocomotionMode::Ground;

            // Gravity is not applied on the ground; drop leftover fall speed
            if player_vel.y < 0.0 {
                player_vel.y = 0.0;
            }
        } else {
            commands.entity(entity).remove::<GroundNormal>();
            if was_grounded {
                commands.entity(entity).remove::<Grounded>();
            }
            locomotion.mode = LocomotionMode::Falling;
        }
    }
}

/// Turns the control rotation from look input
pub fn apply_control_yaw(mut query: Query<(&LookInput, &PlayerConfig, &mut ControlYaw)>) {
    for (look, config, mut yaw) in &mut query {
        if look.x != 0.0 {
            yaw.0 -= look.x * config.look_sensitivity;
        }
    }
}

/// Applies ground movement - sets horizontal velocity relative to the control yaw
pub fn ground_movement(
    mut query: Query<
        (&MoveInput, &PlayerConfig, &ControlYaw, &Locomotion, &mut PlayerVelocity),
        With<Grounded>,
    >,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (input, config, yaw, locomotion, mut velocity) in &mut query {
        if !locomotion.mode.is_ground_relative() {
            continue;
        }

        let (forward, right) = yaw.axes();
        let move_dir = (forward * input.y + right * input.x).normalize_or_zero();

        let target = move_dir * config.walk_speed;
        let current = Vec3::new(velocity.x, 0.0, velocity.z);

        let accel = if input.length_squared() > 0.01 {
            config.ground_accel
        } else {
            config.ground_friction
        };

        let new_vel = current.move_towards(target, accel * dt);
        velocity.x = new_vel.x;
        velocity.z = new_vel.z;
    }
}

/// Applies air movement with reduced control
pub fn air_movement(
    mut query: Query<
        (&MoveInput, &PlayerConfig, &ControlYaw, &Locomotion, &mut PlayerVelocity),
        Without<Grounded>,
    >,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (input, config, yaw, locomotion, mut velocity) in &mut query {
        if locomotion.mode != LocomotionMode::Falling || input.length_squared() < 0.01 {
            continue;
        }

        let (forward, right) = yaw.axes();
        let move_dir = (forward * input.y + right * input.x).normalize_or_zero();

        let current_speed = velocity.dot(move_dir);
        let add_speed = (config.walk_speed - current_speed).max(0.0);
        let accel_speed = (config.air_accel * dt).min(add_speed);

        velocity.x += move_dir.x * accel_speed;
        velocity.z += move_dir.z * accel_speed;
    }
}

/// Turns bodies toward their horizontal velocity while rotation follows movement
pub fn orient_to_movement(
    mut query: Query<(&mut Transform, &PlayerConfig, &PlayerVelocity, &Locomotion, &MotionTask)>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (mut transform, config, velocity, locomotion, task) in &mut query {
        if !locomotion.rotation_follows_movement || task.0.is_some() {
            continue;
        }

        let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
        if horizontal.length_squared() < 0.01 {
            continue;
        }
        let Ok(heading) = Dir3::new(horizontal) else {
            continue;
        };

        let target = crate::climb::facing(heading);
        let angle = transform.rotation.angle_between(target);
        if angle <= f32::EPSILON {
            continue;
        }

        let step = (config.rotation_rate * dt / angle).min(1.0);
        transform.rotation = transform.rotation.slerp(target, step);
    }
}

/// Applies gravity to falling bodies
pub fn apply_gravity(
    mut query: Query<(&mut PlayerVelocity, &Locomotion), Without<Grounded>>,
    gravity: Res<Gravity>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    for (mut velocity, locomotion) in &mut query {
        if locomotion.mode == LocomotionMode::Falling {
            velocity.0 += gravity.0 * dt;
        }
    }
}

/// Syncs PlayerVelocity to Avian's LinearVelocity, projecting onto ground surface when grounded
pub fn apply_velocity(
    mut query: Query<
        (
            &mut PlayerVelocity,
            &PlayerConfig,
            &mut LinearVelocity,
            Has<Grounded>,
            Option<&GroundNormal>,
        ),
        With<Player>,
    >,
) {
    for (mut player_vel, config, mut lin_vel, grounded, ground_normal) in &mut query {
        // Clamp horizontal speed
        if config.max_horizontal_speed > 0.0 {
            let h_speed = Vec2::new(player_vel.x, player_vel.z).length();
            if h_speed > config.max_horizontal_speed {
                let scale = config.max_horizontal_speed / h_speed;
                player_vel.x *= scale;
                player_vel.z *= scale;
            }
        }

        if !grounded {
            lin_vel.0 = player_vel.0;
            continue;
        }

        let horizontal = Vec3::new(player_vel.x, 0.0, player_vel.z);
        let horizontal_speed = horizontal.length();

        match ground_normal {
            Some(GroundNormal(normal)) if horizontal_speed > 0.01 => {
                // Project onto the slope and rescale so the horizontal speed is preserved.
                let projected = horizontal - *normal * horizontal.dot(*normal);
                let proj_horiz = Vec2::new(projected.x, projected.z).length();
                let scale = if proj_horiz > 0.001 {
                    horizontal_speed / proj_horiz
                } else {
                    1.0
                };
                let slope_vel = projected * scale;
                lin_vel.x = slope_vel.x;
                lin_vel.y = (player_vel.y + slope_vel.y).min(slope_vel.y);
                lin_vel.z = slope_vel.z;
            }
            _ => {
                lin_vel.x = player_vel.x;
                lin_vel.z = player_vel.z;
                lin_vel.y = player_vel.y.min(-0.5);
            }
        }
    }
}
