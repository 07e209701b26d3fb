use avian3d::prelude::*;
use bevy::prelude::*;

use super::input::{JumpPressed, MoveInput};
use super::jump::jump_impulse;
use super::messages::ClimbMessage;
use super::state::*;
use crate::climb::{
    ClimbConfig, ClimbController, InterpolatedMove, LocomotionMode, MotionDriver, MoveHandle,
    Pose, ProbeRig,
};
use crate::physics::WorldRays;

/// Motion driver over a player's ECS components.
pub struct CharacterBody<'a> {
    pub transform: &'a mut Transform,
    pub velocity: &'a mut PlayerVelocity,
    pub locomotion: &'a mut Locomotion,
    pub motion: &'a mut MotionTask,
    pub config: &'a PlayerConfig,
    pub grounded: bool,
    /// Set when `jump` applied an impulse; the caller updates ground markers
    pub jumped: bool,
}

impl MotionDriver for CharacterBody<'_> {
    fn rig(&self) -> ProbeRig {
        let scale = self.transform.scale.y;
        let up = self.transform.up();
        ProbeRig {
            base: self.transform.translation,
            head: self.transform.translation + up * (self.config.head_height * scale),
            forward: self.transform.forward(),
            up,
            right: self.transform.right(),
            half_height: self.config.half_height * scale,
        }
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn jump(&mut self) {
        if jump_impulse(self.config, self.velocity, self.grounded) {
            self.grounded = false;
            self.jumped = true;
            self.locomotion.mode = LocomotionMode::Falling;
        }
    }

    fn stop_all_motion(&mut self) {
        self.velocity.0 = Vec3::ZERO;
    }

    fn set_locomotion_mode(&mut self, mode: LocomotionMode) {
        self.locomotion.mode = mode;
    }

    fn set_rotation_follows_movement(&mut self, follows: bool) {
        self.locomotion.rotation_follows_movement = follows;
    }

    fn move_to_top_edge(&mut self, position: Vec3) {
        self.transform.translation = position;
    }

    fn move_to(&mut self, handle: MoveHandle, target: Pose, duration: f32) {
        let from = Pose::new(self.transform.translation, self.transform.rotation);
        self.motion.0 = Some(InterpolatedMove::new(handle, from, target, duration));
    }

    fn cancel_move(&mut self, handle: MoveHandle) {
        if self.is_move_active(handle) {
            self.motion.0 = None;
        }
    }

    fn is_move_active(&self, handle: MoveHandle) -> bool {
        self.motion.0.is_some_and(|task| task.handle == handle)
    }

    fn set_climb_velocity(&mut self, velocity: Vec3) {
        self.velocity.0 = velocity;
    }

    fn settle_on_surface(&mut self, correction: Vec3, rotation: Quat) {
        self.transform.translation += correction;
        self.transform.rotation = rotation;
    }
}

type ClimberComponents = (
    Entity,
    &'static mut ClimbController,
    &'static ClimbConfig,
    &'static PlayerConfig,
    &'static mut Transform,
    &'static mut PlayerVelocity,
    &'static mut Locomotion,
    &'static mut MotionTask,
    Has<Grounded>,
);

/// Advances climb timers and moves attached climbers along their surface.
///
/// Runs before `handle_climb_action`, so a climb scheduled by this step's jump starts
/// counting down on the next step.
pub fn tick_climbers(
    spatial_query: SpatialQuery,
    mut query: Query<(ClimberComponents, &MoveInput), With<Player>>,
    mut writer: MessageWriter<ClimbMessage>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    let rays = WorldRays::new(&spatial_query);

    for (climber, move_input) in &mut query {
        let (
            entity,
            mut controller,
            climb_config,
            config,
            mut transform,
            mut velocity,
            mut locomotion,
            mut motion,
            grounded,
        ) = climber;

        let mut body = CharacterBody {
            transform: &mut *transform,
            velocity: &mut *velocity,
            locomotion: &mut *locomotion,
            motion: &mut *motion,
            config,
            grounded,
            jumped: false,
        };

        let events = controller.tick(dt, move_input.0, &mut body, &rays, climb_config);
        writer.write_batch(events.into_iter().map(|event| ClimbMessage { entity, event }));
    }
}

/// Consumes jump presses and hands them to the climb controller.
pub fn handle_climb_action(
    mut commands: Commands,
    spatial_query: SpatialQuery,
    mut query: Query<(ClimberComponents, &mut JumpPressed), With<Player>>,
    mut writer: MessageWriter<ClimbMessage>,
) {
    let rays = WorldRays::new(&spatial_query);

    for (climber, mut jump_pressed) in &mut query {
        if !jump_pressed.0 {
            continue;
        }
        jump_pressed.0 = false;

        let (
            entity,
            mut controller,
            climb_config,
            config,
            mut transform,
            mut velocity,
            mut locomotion,
            mut motion,
            grounded,
        ) = climber;

        let mut body = CharacterBody {
            transform: &mut *transform,
            velocity: &mut *velocity,
            locomotion: &mut *locomotion,
            motion: &mut *motion,
            config,
            grounded,
            jumped: false,
        };

        let event = controller.on_action_requested(&mut body, &rays, climb_config);

        if body.jumped {
            commands
                .entity(entity)
                .remove::<(Grounded, GroundNormal, JumpCut)>();
        }
        if let Some(event) = event {
            writer.write(ClimbMessage { entity, event });
        }
    }
}

/// Drives bodies along their interpolated move and clears the move once it lands.
pub fn advance_motion_tasks(
    mut query: Query<(&mut Transform, &mut MotionTask, Option<&mut PlayerVelocity>)>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (mut transform, mut motion, velocity) in &mut query {
        let Some(task) = motion.0.as_mut() else {
            continue;
        };

        let (pose, finished) = task.advance(dt);
        transform.translation = pose.translation;
        transform.rotation = pose.rotation;

        // The move owns the transform; keep physics from fighting it
        if let Some(mut velocity) = velocity {
            velocity.0 = Vec3::ZERO;
        }

        if finished {
            motion.0 = None;
        }
    }
}
