//! Geometry and body doubles for exercising the controller without a physics world.

use std::cell::Cell;

use bevy::prelude::*;

use super::motion::{LocomotionMode, MotionDriver, MoveHandle, Pose};
use super::probe::{ProbeRig, SurfaceHit, SurfaceQuery};

const HEAD_HEIGHT: f32 = 0.7;
const HALF_HEIGHT: f32 = 0.96;
/// Upward speed `MockBody::jump` gives the body
pub const JUMP_VELOCITY: f32 = 7.0;

/// Rig of an unrotated body (facing -Z) standing at `base`.
pub fn rig_at(base: Vec3) -> ProbeRig {
    ProbeRig {
        base,
        head: base + Vec3::Y * HEAD_HEIGHT,
        forward: Dir3::NEG_Z,
        up: Dir3::Y,
        right: Dir3::X,
        half_height: HALF_HEIGHT,
    }
}

/// A vertical planar panel: infinite downward unless `bottom` is set, capped at `top`.
#[derive(Clone, Copy, Debug)]
pub struct Panel {
    point: Vec3,
    normal: Dir3,
    top: f32,
    bottom: f32,
    half_width: f32,
}

impl Panel {
    pub fn new(point: Vec3, normal: Dir3, top: f32) -> Self {
        Self {
            point,
            normal,
            top,
            bottom: f32::NEG_INFINITY,
            half_width: f32::INFINITY,
        }
    }

    /// Wall in the plane `z = z`, facing +Z.
    pub fn facing_z(z: f32, top: f32) -> Self {
        Self::new(Vec3::new(0.0, 0.0, z), Dir3::Z, top)
    }

    pub fn with_half_width(mut self, half_width: f32) -> Self {
        self.half_width = half_width;
        self
    }

    pub fn with_bottom(mut self, bottom: f32) -> Self {
        self.bottom = bottom;
        self
    }

    fn intersect(
        &self,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
    ) -> Option<(f32, SurfaceHit)> {
        let facing = direction.dot(*self.normal);
        if facing >= 0.0 {
            return None;
        }

        let distance = (self.point - origin).dot(*self.normal) / facing;
        if !(0.0..=max_distance).contains(&distance) {
            return None;
        }

        let point = origin + *direction * distance;
        if point.y > self.top || point.y < self.bottom {
            return None;
        }

        let tangent = self.normal.cross(Vec3::Y).normalize();
        if (point - self.point).dot(tangent).abs() > self.half_width {
            return None;
        }

        Some((
            distance,
            SurfaceHit {
                point,
                normal: self.normal,
                entity: None,
            },
        ))
    }
}

/// Ray target made of panels; counts every cast.
#[derive(Default)]
pub struct FlatWall {
    panels: Vec<Panel>,
    casts: Cell<usize>,
}

impl FlatWall {
    pub fn none() -> Self {
        Self::default()
    }

    /// One unbounded wall at `z` facing +Z, topping out at `top`.
    pub fn new(z: f32, top: f32) -> Self {
        Self::from_panels(vec![Panel::facing_z(z, top)])
    }

    pub fn from_panels(panels: Vec<Panel>) -> Self {
        Self {
            panels,
            casts: Cell::new(0),
        }
    }

    pub fn clear(&mut self) {
        self.panels.clear();
    }

    pub fn casts(&self) -> usize {
        self.casts.get()
    }
}

impl SurfaceQuery for FlatWall {
    fn cast_ray(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<SurfaceHit> {
        self.casts.set(self.casts.get() + 1);
        self.panels
            .iter()
            .filter_map(|panel| panel.intersect(origin, direction, max_distance))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, hit)| hit)
    }
}

/// Records every command the controller issues. Moves only complete on `finish_move`.
#[derive(Debug)]
pub struct MockBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub grounded: bool,
    pub mode: LocomotionMode,
    pub rotation_follows_movement: bool,
    pub half_height: f32,
    pub jumps: usize,
    pub active_move: Option<(MoveHandle, Pose, f32)>,
    pub cancelled: Vec<MoveHandle>,
}

impl MockBody {
    pub fn standing(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            grounded: true,
            mode: LocomotionMode::Ground,
            rotation_follows_movement: true,
            half_height: HALF_HEIGHT,
            jumps: 0,
            active_move: None,
            cancelled: Vec::new(),
        }
    }

    /// Snaps to the target of the in-flight move and clears it.
    pub fn finish_move(&mut self) {
        if let Some((_, pose, _)) = self.active_move.take() {
            self.position = pose.translation;
            self.rotation = pose.rotation;
        }
    }
}

impl MotionDriver for MockBody {
    fn rig(&self) -> ProbeRig {
        let transform = Transform::from_translation(self.position).with_rotation(self.rotation);
        ProbeRig {
            base: self.position,
            head: self.position + transform.up() * HEAD_HEIGHT,
            forward: transform.forward(),
            up: transform.up(),
            right: transform.right(),
            half_height: self.half_height,
        }
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn jump(&mut self) {
        self.jumps += 1;
        if self.grounded {
            self.velocity.y = JUMP_VELOCITY;
        }
    }

    fn stop_all_motion(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    fn set_locomotion_mode(&mut self, mode: LocomotionMode) {
        self.mode = mode;
    }

    fn set_rotation_follows_movement(&mut self, follows: bool) {
        self.rotation_follows_movement = follows;
    }

    fn move_to_top_edge(&mut self, position: Vec3) {
        self.position = position;
    }

    fn move_to(&mut self, handle: MoveHandle, target: Pose, duration: f32) {
        self.active_move = Some((handle, target, duration));
    }

    fn cancel_move(&mut self, handle: MoveHandle) {
        if self.is_move_active(handle) {
            self.active_move = None;
            self.cancelled.push(handle);
        }
    }

    fn is_move_active(&self, handle: MoveHandle) -> bool {
        self.active_move.is_some_and(|(active, _, _)| active == handle)
    }

    fn set_climb_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn settle_on_surface(&mut self, correction: Vec3, rotation: Quat) {
        self.position += correction;
        self.rotation = rotation;
    }
}
