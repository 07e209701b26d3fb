use avian3d::prelude::*;
use bevy::prelude::*;

use super::GameLayer;
use crate::climb::{SurfaceHit, SurfaceQuery};

/// Ray queries against static world geometry through Avian's spatial query pipeline.
pub struct WorldRays<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> WorldRays<'a, 'w, 's> {
    /// Queries only `GameLayer::World`, so the character never hits its own collider.
    pub fn new(spatial_query: &'a SpatialQuery<'w, 's>) -> Self {
        Self {
            spatial_query,
            filter: SpatialQueryFilter::default().with_mask(GameLayer::World),
        }
    }
}

impl SurfaceQuery for WorldRays<'_, '_, '_> {
    fn cast_ray(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<SurfaceHit> {
        let hit = self
            .spatial_query
            .cast_ray(origin, direction, max_distance, true, &self.filter)?;

        // Rays starting inside a collider report a zero normal.
        let normal = Dir3::new(hit.normal).ok()?;

        Some(SurfaceHit {
            point: origin + *direction * hit.distance,
            normal,
            entity: Some(hit.entity),
        })
    }
}
