//! Scene graph module
//!
//! Provides the scene graph and static geometry seams the object registry
//! drives, plus an in-memory implementation of both.

mod bounds;
mod scene_graph;
mod static_geometry;
mod batched_geometry;
mod scene_tree;

pub use bounds::AABB;
pub use scene_graph::{NodeKey, SceneGraph, Transform};
pub use static_geometry::{
    BatchEntity, GeometryRegion, RenderQueueGroup, StaticGeometry, VisibilityFlags,
};
pub use batched_geometry::BatchedGeometry;
pub use scene_tree::SceneTree;
