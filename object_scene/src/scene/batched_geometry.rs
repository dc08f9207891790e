/// In-memory [`StaticGeometry`] implementation used by [`SceneTree`](super::SceneTree).

use std::collections::BTreeMap;
use glam::{IVec3, Vec3};
use crate::error::Result;
use crate::engine_bail;
use super::bounds::AABB;
use super::static_geometry::{
    BatchEntity, GeometryRegion, RenderQueueGroup, StaticGeometry, VisibilityFlags,
};

/// Static geometry group that buckets entities by region on build.
///
/// An entity belongs to the region containing the center of its bounds
/// (or its position when the bounds are null).
#[derive(Debug, Clone)]
pub struct BatchedGeometry {
    name: String,
    region_dimensions: Vec3,
    visibility_flags: VisibilityFlags,
    cast_shadows: bool,
    render_queue_group: RenderQueueGroup,
    rendering_distance: Option<f32>,
    queued: Vec<BatchEntity>,
    /// Built regions keyed by region index; `None` until built
    regions: Option<BTreeMap<[i32; 3], GeometryRegion>>,
}

impl BatchedGeometry {
    /// Default region size, matching the usual batch granularity of world cells
    pub const DEFAULT_REGION_DIMENSIONS: Vec3 = Vec3::splat(1000.0);

    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            region_dimensions: Self::DEFAULT_REGION_DIMENSIONS,
            visibility_flags: VisibilityFlags::all(),
            cast_shadows: false,
            render_queue_group: RenderQueueGroup::Main,
            rendering_distance: None,
            queued: Vec::new(),
            regions: None,
        }
    }

    fn region_index(&self, entity: &BatchEntity) -> IVec3 {
        let anchor = if entity.bounds.is_null() {
            entity.transform.position
        } else {
            entity.bounds.center()
        };
        (anchor / self.region_dimensions).floor().as_ivec3()
    }
}

impl StaticGeometry for BatchedGeometry {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_region_dimensions(&mut self, dimensions: Vec3) {
        self.region_dimensions = dimensions;
    }

    fn region_dimensions(&self) -> Vec3 {
        self.region_dimensions
    }

    fn set_visibility_flags(&mut self, flags: VisibilityFlags) {
        self.visibility_flags = flags;
    }

    fn visibility_flags(&self) -> VisibilityFlags {
        self.visibility_flags
    }

    fn set_cast_shadows(&mut self, cast: bool) {
        self.cast_shadows = cast;
    }

    fn cast_shadows(&self) -> bool {
        self.cast_shadows
    }

    fn set_render_queue_group(&mut self, group: RenderQueueGroup) {
        self.render_queue_group = group;
    }

    fn render_queue_group(&self) -> RenderQueueGroup {
        self.render_queue_group
    }

    fn set_rendering_distance(&mut self, distance: Option<f32>) {
        self.rendering_distance = distance;
    }

    fn rendering_distance(&self) -> Option<f32> {
        self.rendering_distance
    }

    fn add_entity(&mut self, entity: BatchEntity) {
        self.queued.push(entity);
    }

    fn queued_entities(&self) -> &[BatchEntity] {
        &self.queued
    }

    fn build(&mut self) -> Result<()> {
        let dims = self.region_dimensions;
        if !dims.is_finite() || dims.min_element() <= 0.0 {
            engine_bail!(InvalidResource => "objscene::BatchedGeometry",
                "Static geometry '{}' has invalid region dimensions {:?}", self.name, dims);
        }

        let mut regions: BTreeMap<[i32; 3], GeometryRegion> = BTreeMap::new();
        for entity in &self.queued {
            let index = self.region_index(entity);
            let region = regions.entry(index.to_array()).or_insert_with(|| GeometryRegion {
                index,
                bounds: AABB::NULL,
                meshes: Vec::new(),
            });
            region.bounds.merge(&entity.bounds);
            region.meshes.push(entity.mesh.clone());
        }

        crate::engine_trace!("objscene::BatchedGeometry",
            "Built '{}': {} entities in {} regions", self.name, self.queued.len(), regions.len());

        self.regions = Some(regions);
        Ok(())
    }

    fn destroy(&mut self) {
        self.regions = None;
    }

    fn is_built(&self) -> bool {
        self.regions.is_some()
    }

    fn regions(&self) -> Vec<GeometryRegion> {
        self.regions
            .as_ref()
            .map(|r| r.values().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "batched_geometry_tests.rs"]
mod tests;
