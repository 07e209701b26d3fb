use bevy::prelude::*;

use super::config::ClimbConfig;
use super::motion::{LocomotionMode, MotionDriver, MoveHandle, Pose, facing};
use super::probe::{ProbeOutcome, SurfaceHit, SurfaceQuery, probe_surface};

/// Surface contact a climb attaches to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimbTarget {
    pub point: Vec3,
    pub normal: Dir3,
}

impl From<SurfaceHit> for ClimbTarget {
    fn from(hit: SurfaceHit) -> Self {
        Self {
            point: hit.point,
            normal: hit.normal,
        }
    }
}

/// Climb controller phases.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ClimbPhase {
    /// Baseline: not climbing, nothing pending
    #[default]
    Grounded,
    /// A plain jump (or ledge vault) is in flight
    JumpPending,
    /// A wall was found; climbing starts when `remaining` runs out
    ClimbPending { remaining: f32, target: ClimbTarget },
    /// Attached to `wall`. `active_move` is the attach move while it is still running.
    Climbing {
        wall: ClimbTarget,
        active_move: Option<MoveHandle>,
    },
}

/// Why a climber let go of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetachReason {
    /// The player pressed the climb action again
    Released,
    /// The surface is no longer in front of the climber
    SurfaceLost,
    /// The climber reached the top of the surface
    ToppedOut,
}

/// Observable results of controller decisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClimbEvent {
    Jumped,
    Landed,
    VaultedLedge { position: Vec3 },
    ClimbScheduled { target: ClimbTarget },
    ClimbCancelled,
    ClimbStarted { target: Pose },
    ClimbSettled,
    Detached { reason: DetachReason },
}

/// Per-character climb state machine.
///
/// Driven by `on_action_requested` for jump/climb presses and by `tick` once per
/// simulation step. Probe results never outlive the call that produced them.
#[derive(Component, Debug, Default)]
pub struct ClimbController {
    phase: ClimbPhase,
    next_move: u32,
}

impl ClimbController {
    pub fn phase(&self) -> ClimbPhase {
        self.phase
    }

    pub fn is_climbing(&self) -> bool {
        matches!(self.phase, ClimbPhase::Climbing { .. })
    }

    /// Handles a press of the jump/climb action.
    ///
    /// - Climbing: let go of the wall
    /// - Climb pending: cancel the pending climb
    /// - Otherwise: jump, then probe once for a wall (schedule a climb) or a ledge (vault)
    pub fn on_action_requested(
        &mut self,
        body: &mut impl MotionDriver,
        rays: &impl SurfaceQuery,
        config: &ClimbConfig,
    ) -> Option<ClimbEvent> {
        match self.phase {
            ClimbPhase::Climbing { .. } => {
                self.detach(body);
                Some(ClimbEvent::Detached {
                    reason: DetachReason::Released,
                })
            }
            ClimbPhase::ClimbPending { .. } => {
                // Not attached yet: the jump keeps its momentum
                self.restore_locomotion(body);
                Some(ClimbEvent::ClimbCancelled)
            }
            ClimbPhase::Grounded | ClimbPhase::JumpPending => {
                body.jump();

                let rig = body.rig();
                match probe_surface(rays, &rig, Vec3::ZERO, config.probe_distance) {
                    ProbeOutcome::Open => {
                        self.phase = ClimbPhase::JumpPending;
                        Some(ClimbEvent::Jumped)
                    }
                    ProbeOutcome::Ledge { mount, .. } => {
                        body.move_to_top_edge(mount);
                        self.phase = ClimbPhase::JumpPending;
                        Some(ClimbEvent::VaultedLedge { position: mount })
                    }
                    ProbeOutcome::Wall { head, .. } => {
                        let target = ClimbTarget::from(head);
                        self.phase = ClimbPhase::ClimbPending {
                            remaining: config.climb_delay,
                            target,
                        };
                        Some(ClimbEvent::ClimbScheduled { target })
                    }
                }
            }
        }
    }

    /// Advances timers and climb movement by one simulation step.
    ///
    /// `input` is the movement axis pair: `x` right/left, `y` forward/backward.
    pub fn tick(
        &mut self,
        dt: f32,
        input: Vec2,
        body: &mut impl MotionDriver,
        rays: &impl SurfaceQuery,
        config: &ClimbConfig,
    ) -> Vec<ClimbEvent> {
        let mut events = Vec::new();

        match &mut self.phase {
            ClimbPhase::Grounded => {}
            ClimbPhase::JumpPending => {
                if body.is_grounded() {
                    self.phase = ClimbPhase::Grounded;
                    events.push(ClimbEvent::Landed);
                }
            }
            ClimbPhase::ClimbPending { remaining, target } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    let target = *target;
                    let pose = self.initiate(target, body, config);
                    events.push(ClimbEvent::ClimbStarted { target: pose });
                }
            }
            ClimbPhase::Climbing { active_move, .. } => {
                if let Some(handle) = *active_move {
                    if body.is_move_active(handle) {
                        return events;
                    }
                    *active_move = None;
                    events.push(ClimbEvent::ClimbSettled);
                }
                self.climb_step(dt, input, body, rays, config, &mut events);
            }
        }

        events
    }

    /// Attaches to `target`: hard stop, free rotation, unconstrained locomotion, then an
    /// interpolated move to the standoff pose.
    fn initiate(
        &mut self,
        target: ClimbTarget,
        body: &mut impl MotionDriver,
        config: &ClimbConfig,
    ) -> Pose {
        let handle = self.allocate_move();
        self.phase = ClimbPhase::Climbing {
            wall: target,
            active_move: Some(handle),
        };

        body.stop_all_motion();
        body.set_rotation_follows_movement(false);
        body.set_locomotion_mode(LocomotionMode::Unconstrained);

        debug!(
            "Climb target: point {:?}, normal {:?}",
            target.point, target.normal
        );

        let pose = Pose::facing_surface(target.point, target.normal, config.wall_offset);
        body.move_to(handle, pose, config.attach_duration);
        pose
    }

    /// Lets go of the wall: cancels the attach move if one is still in flight, clears the
    /// climb velocity and returns to ground-relative locomotion.
    fn detach(&mut self, body: &mut impl MotionDriver) {
        if let ClimbPhase::Climbing {
            active_move: Some(handle),
            ..
        } = self.phase
        {
            body.cancel_move(handle);
        }

        body.set_climb_velocity(Vec3::ZERO);
        self.restore_locomotion(body);
    }

    /// Returns to the baseline phase with ground-relative locomotion. Velocity is untouched.
    fn restore_locomotion(&mut self, body: &mut impl MotionDriver) {
        self.phase = ClimbPhase::Grounded;
        body.set_locomotion_mode(LocomotionMode::Falling);
        body.set_rotation_follows_movement(true);
    }

    /// Moves a settled climber along the wall.
    ///
    /// Zero input holds still without probing. Otherwise probes in place first (losing the
    /// surface drops the climber), then probes at the position the input would move to:
    /// - Wall within `max_surface_turn`: move, keep the standoff and face the new normal
    /// - Ledge while climbing up: top out onto it
    /// - Anything else: the edge blocks the move
    fn climb_step(
        &mut self,
        dt: f32,
        input: Vec2,
        body: &mut impl MotionDriver,
        rays: &impl SurfaceQuery,
        config: &ClimbConfig,
        events: &mut Vec<ClimbEvent>,
    ) {
        let ClimbPhase::Climbing { wall, .. } = self.phase else {
            return;
        };

        // No input, no probes
        if input == Vec2::ZERO {
            body.set_climb_velocity(Vec3::ZERO);
            return;
        }

        let rig = body.rig();
        if probe_surface(rays, &rig, Vec3::ZERO, config.probe_distance) == ProbeOutcome::Open {
            self.detach(body);
            events.push(ClimbEvent::Detached {
                reason: DetachReason::SurfaceLost,
            });
            return;
        }

        let velocity = (*rig.up * input.y + *rig.right * input.x) * config.climb_speed;
        let step = velocity * dt;

        match probe_surface(rays, &rig, step, config.probe_distance) {
            ProbeOutcome::Wall { pelvis, head } => {
                let turn = head.normal.as_vec3().angle_between(wall.normal.as_vec3());
                if turn > config.max_surface_turn {
                    body.set_climb_velocity(Vec3::ZERO);
                    return;
                }

                // Keep the standoff along the new normal only.
                let standoff = pelvis.point + *pelvis.normal * config.wall_offset;
                let depth = (standoff - (rig.base + step)).dot(*pelvis.normal);

                body.set_climb_velocity(velocity);
                body.settle_on_surface(*pelvis.normal * depth, facing(-head.normal));

                self.phase = ClimbPhase::Climbing {
                    wall: ClimbTarget::from(head),
                    active_move: None,
                };
            }
            ProbeOutcome::Ledge { mount, .. } if input.y > 0.0 => {
                self.detach(body);
                body.move_to_top_edge(mount);
                events.push(ClimbEvent::Detached {
                    reason: DetachReason::ToppedOut,
                });
                events.push(ClimbEvent::VaultedLedge { position: mount });
            }
            ProbeOutcome::Ledge { .. } | ProbeOutcome::Open => {
                body.set_climb_velocity(Vec3::ZERO);
            }
        }
    }

    fn allocate_move(&mut self) -> MoveHandle {
        self.next_move = self.next_move.wrapping_add(1);
        MoveHandle(self.next_move)
    }
}
