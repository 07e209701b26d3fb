use bevy::prelude::*;

use super::probe::ProbeRig;

/// How the character body integrates movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocomotionMode {
    /// Walking on a surface
    #[default]
    Ground,
    /// Airborne under gravity
    Falling,
    /// No gravity and no ground constraint (attached to a climb surface)
    Unconstrained,
}

impl LocomotionMode {
    /// Ground and falling both move relative to the ground plane with gravity.
    pub fn is_ground_relative(self) -> bool {
        !matches!(self, LocomotionMode::Unconstrained)
    }
}

/// Identifies one interpolated move so a stale one can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveHandle(pub u32);

/// Target position and orientation of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Pose standing `offset` away from `point` along `normal`, facing into the surface.
    pub fn facing_surface(point: Vec3, normal: Dir3, offset: f32) -> Self {
        Self {
            translation: point + *normal * offset,
            rotation: facing(-normal),
        }
    }
}

/// Rotation whose forward axis points along `direction`.
pub fn facing(direction: Dir3) -> Quat {
    Transform::IDENTITY.looking_to(direction, Dir3::Y).rotation
}

/// Time-bounded move/rotate toward a target pose.
#[derive(Debug, Clone, Copy)]
pub struct InterpolatedMove {
    pub handle: MoveHandle,
    pub from: Pose,
    pub to: Pose,
    pub elapsed: f32,
    pub duration: f32,
}

impl InterpolatedMove {
    pub fn new(handle: MoveHandle, from: Pose, to: Pose, duration: f32) -> Self {
        Self {
            handle,
            from,
            to,
            elapsed: 0.0,
            duration,
        }
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Advances the move by `dt` and returns the pose to apply plus whether the move finished.
    pub fn advance(&mut self, dt: f32) -> (Pose, bool) {
        self.elapsed += dt;
        let t = self.progress();
        if t >= 1.0 {
            return (self.to, true);
        }

        let eased = ease_in_out(t);
        let pose = Pose {
            translation: self.from.translation.lerp(self.to.translation, eased),
            rotation: self.from.rotation.slerp(self.to.rotation, eased),
        };
        (pose, false)
    }
}

/// Cubic ease-in-out
pub fn ease_in_out(x: f32) -> f32 {
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}

/// Commands the climb controller issues to a character body.
///
/// The ECS implementation is `crate::player::CharacterBody`. Calls take effect
/// immediately except `move_to`, which runs over later ticks.
pub trait MotionDriver {
    /// Probe origins and axes for the body as it stands now.
    fn rig(&self) -> ProbeRig;

    fn is_grounded(&self) -> bool;

    /// Standard upward jump impulse. No effect if the body cannot jump.
    fn jump(&mut self);

    /// Zeroes all velocity.
    fn stop_all_motion(&mut self);

    fn set_locomotion_mode(&mut self, mode: LocomotionMode);

    fn set_rotation_follows_movement(&mut self, follows: bool);

    /// Relocates the body onto a ledge top immediately.
    fn move_to_top_edge(&mut self, position: Vec3);

    /// Starts a non-blocking interpolated move. Replaces any move already in flight.
    fn move_to(&mut self, handle: MoveHandle, target: Pose, duration: f32);

    /// Stops the move identified by `handle`. A stale handle is ignored.
    fn cancel_move(&mut self, handle: MoveHandle);

    fn is_move_active(&self, handle: MoveHandle) -> bool;

    /// Velocity while attached to a surface.
    fn set_climb_velocity(&mut self, velocity: Vec3);

    /// Small positional correction and reorientation while attached.
    fn settle_on_surface(&mut self, correction: Vec3, rotation: Quat);
}
