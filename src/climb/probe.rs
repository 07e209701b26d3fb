use bevy::prelude::*;

/// A single surface contact returned by a ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// World-space impact point
    pub point: Vec3,
    /// Outward surface normal at the impact point
    pub normal: Dir3,
    /// Entity that owns the hit collider, if the backend reports one
    pub entity: Option<Entity>,
}

/// Directional ray queries against world geometry.
///
/// Implemented over Avian's `SpatialQuery` in `crate::physics::WorldRays`; tests
/// provide their own geometry.
pub trait SurfaceQuery {
    /// Casts a ray and returns the closest hit within `max_distance`.
    fn cast_ray(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<SurfaceHit>;
}

/// Probe origins and axes of a character body, sampled at probe time.
#[derive(Debug, Clone, Copy)]
pub struct ProbeRig {
    /// Body origin (pelvis probe origin)
    pub base: Vec3,
    /// Head socket (head probe origin)
    pub head: Vec3,
    pub forward: Dir3,
    pub up: Dir3,
    pub right: Dir3,
    /// Capsule half height, already scaled by the body's scale
    pub half_height: f32,
}

/// Result of a two-stage probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeOutcome {
    /// The pelvis ray missed; nothing in front of the character.
    Open,
    /// Both rays hit: a surface reaching at least head height.
    Wall { pelvis: SurfaceHit, head: SurfaceHit },
    /// The pelvis ray hit but the head ray passed over the top.
    Ledge { pelvis: SurfaceHit, mount: Vec3 },
}

impl ProbeOutcome {
    pub fn is_wall(&self) -> bool {
        matches!(self, ProbeOutcome::Wall { .. })
    }
}

/// Probes for a climbable surface using a two-ray approach.
///
/// 1. Pelvis ray (from the body origin, forward): must HIT, otherwise `Open`
/// 2. Head ray (from the head socket, forward): HIT means `Wall`
/// 3. Head ray MISS means the surface tops out between pelvis and head: `Ledge`,
///    with a mount position one half height above the pelvis ray origin
///
/// `offset` shifts both origins, letting a climber probe where it is about to move.
pub fn probe_surface(
    rays: &impl SurfaceQuery,
    rig: &ProbeRig,
    offset: Vec3,
    max_distance: f32,
) -> ProbeOutcome {
    let pelvis_origin = rig.base + offset;
    let Some(pelvis) = rays.cast_ray(pelvis_origin, rig.forward, max_distance) else {
        return ProbeOutcome::Open;
    };

    let head_origin = rig.head + offset;
    match rays.cast_ray(head_origin, rig.forward, max_distance) {
        Some(head) => ProbeOutcome::Wall { pelvis, head },
        None => ProbeOutcome::Ledge {
            pelvis,
            mount: pelvis_origin + Vec3::Y * rig.half_height,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climb::testing::{FlatWall, rig_at};

    #[test]
    fn open_space_reports_open() {
        let rays = FlatWall::none();
        let outcome = probe_surface(&rays, &rig_at(Vec3::ZERO), Vec3::ZERO, 2.0);
        assert_eq!(outcome, ProbeOutcome::Open);
    }

    #[test]
    fn head_ray_is_skipped_when_pelvis_misses() {
        let rays = FlatWall::none();
        probe_surface(&rays, &rig_at(Vec3::ZERO), Vec3::ZERO, 2.0);
        assert_eq!(rays.casts(), 1);
    }

    #[test]
    fn tall_wall_hits_both_rays() {
        let rays = FlatWall::new(-0.5, 10.0);
        let outcome = probe_surface(&rays, &rig_at(Vec3::ZERO), Vec3::ZERO, 2.0);

        let ProbeOutcome::Wall { pelvis, head } = outcome else {
            panic!("expected wall, got {outcome:?}");
        };
        assert_eq!(pelvis.point, Vec3::new(0.0, 0.0, -0.5));
        assert_eq!(head.point, Vec3::new(0.0, 0.7, -0.5));
        assert_eq!(head.normal, Dir3::Z);
        assert_eq!(rays.casts(), 2);
    }

    #[test]
    fn wall_beyond_probe_distance_is_open() {
        let rays = FlatWall::new(-3.0, 10.0);
        let outcome = probe_surface(&rays, &rig_at(Vec3::ZERO), Vec3::ZERO, 2.0);
        assert_eq!(outcome, ProbeOutcome::Open);
    }

    #[test]
    fn low_wall_reports_ledge_mount_above_pelvis_origin() {
        let rays = FlatWall::new(-0.5, 2.3);
        let rig = rig_at(Vec3::new(1.0, 2.0, 0.0));
        let outcome = probe_surface(&rays, &rig, Vec3::ZERO, 2.0);

        let ProbeOutcome::Ledge { mount, .. } = outcome else {
            panic!("expected ledge, got {outcome:?}");
        };
        assert_eq!(mount, Vec3::new(1.0, 2.0 + rig.half_height, 0.0));
    }

    #[test]
    fn offset_moves_both_origins() {
        // Top at 1.0: from y=0 the head (0.7) hits, from y=0.5 it passes over.
        let rays = FlatWall::new(-0.5, 1.0);
        let rig = rig_at(Vec3::ZERO);

        assert!(probe_surface(&rays, &rig, Vec3::ZERO, 2.0).is_wall());

        let offset = Vec3::Y * 0.5;
        let ProbeOutcome::Ledge { pelvis, mount } = probe_surface(&rays, &rig, offset, 2.0) else {
            panic!("expected ledge above the offset");
        };
        assert_eq!(pelvis.point.y, 0.5);
        assert_eq!(mount, offset + Vec3::Y * rig.half_height);
    }
}
