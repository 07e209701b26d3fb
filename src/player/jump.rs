use bevy::prelude::*;

use super::input::JumpHeld;
use super::state::*;

/// Applies the jump impulse if the body is on the ground. Returns whether it jumped.
pub fn jump_impulse(config: &PlayerConfig, velocity: &mut PlayerVelocity, grounded: bool) -> bool {
    if !grounded {
        return false;
    }
    velocity.y = config.jump_velocity;
    true
}

/// Implements variable jump height - releasing jump early reduces upward velocity (once per jump)
pub fn variable_jump_height(
    mut commands: Commands,
    mut query: Query<
        (Entity, &JumpHeld, &PlayerConfig, &Locomotion, &mut PlayerVelocity),
        (Without<Grounded>, Without<JumpCut>),
    >,
) {
    for (entity, jump_held, config, locomotion, mut velocity) in &mut query {
        if !locomotion.mode.is_ground_relative() {
            continue;
        }
        if !jump_held.0 && velocity.y > 0.0 {
            velocity.y *= config.jump_cut_multiplier;
            commands.entity(entity).insert(JumpCut);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_only_from_the_ground() {
        let config = PlayerConfig::default();
        let mut velocity = PlayerVelocity(Vec3::new(1.0, -2.0, 0.0));

        assert!(!jump_impulse(&config, &mut velocity, false));
        assert_eq!(velocity.y, -2.0);

        assert!(jump_impulse(&config, &mut velocity, true));
        assert_eq!(velocity.0, Vec3::new(1.0, config.jump_velocity, 0.0));
    }
}
