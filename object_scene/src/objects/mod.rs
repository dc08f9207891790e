//! Object scene registry
//!
//! Tracks the render state of placed world objects: scene nodes, animation
//! handles, per-cell static geometry and per-cell bounds.

mod object_registry;

pub use object_registry::{ObjectSceneRegistry, SizeClass, STATIC_GEOMETRY_REGION_SIZE};
