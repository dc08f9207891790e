/// Static geometry groups.
///
/// A static geometry group collects entities that will never move again and
/// merges them into per-region batches when built. Entities are queued with
/// `add_entity`; `build` partitions the queue into regions, `destroy` throws the
/// built regions away while keeping the queue, so `destroy` + `build` rebuilds
/// the same contents.

use bitflags::bitflags;
use glam::{IVec3, Vec3};
use crate::error::Result;
use super::bounds::AABB;
use super::scene_graph::Transform;

// ===== FLAGS =====

bitflags! {
    /// Visibility mask bits, matched against a camera's visibility mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct VisibilityFlags: u32 {
        const TERRAIN       = 1 << 0;
        /// Normal-sized batched statics
        const STATICS       = 1 << 1;
        /// Small batched statics, culled at the small object distance
        const STATICS_SMALL = 1 << 2;
        const ACTORS        = 1 << 3;
        const MISC          = 1 << 4;
    }
}

/// Render queue a group is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RenderQueueGroup {
    Sky = 10,
    Main = 50,
    Alpha = 70,
}

// ===== BATCH CONTENTS =====

/// One entity folded into a group
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntity {
    /// Mesh the entity was built from
    pub mesh: String,
    /// World transform baked into the batch
    pub transform: Transform,
    /// World-space bounds
    pub bounds: AABB,
}

/// A built batch region
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryRegion {
    /// Region cell in units of the group's region dimensions
    pub index: IVec3,
    /// Union of the contained entities' bounds
    pub bounds: AABB,
    /// Mesh names of the contained entities, in queue order
    pub meshes: Vec<String>,
}

// ===== STATIC GEOMETRY TRAIT =====

/// A batched group of static entities.
pub trait StaticGeometry {
    /// Graph-unique name
    fn name(&self) -> &str;

    /// Size of a single batch region
    fn set_region_dimensions(&mut self, dimensions: Vec3);
    fn region_dimensions(&self) -> Vec3;

    fn set_visibility_flags(&mut self, flags: VisibilityFlags);
    fn visibility_flags(&self) -> VisibilityFlags;

    fn set_cast_shadows(&mut self, cast: bool);
    fn cast_shadows(&self) -> bool;

    fn set_render_queue_group(&mut self, group: RenderQueueGroup);
    fn render_queue_group(&self) -> RenderQueueGroup;

    /// Camera distance beyond which the group is not drawn; `None` means unlimited
    fn set_rendering_distance(&mut self, distance: Option<f32>);
    fn rendering_distance(&self) -> Option<f32>;

    /// Queue an entity for the next build
    fn add_entity(&mut self, entity: BatchEntity);

    /// Entities queued so far
    fn queued_entities(&self) -> &[BatchEntity];

    /// Partition the queued entities into regions
    fn build(&mut self) -> Result<()>;

    /// Drop the built regions, keeping the queue
    fn destroy(&mut self);

    fn is_built(&self) -> bool;

    /// Built regions ordered by region index; empty before `build`
    fn regions(&self) -> Vec<GeometryRegion>;
}
