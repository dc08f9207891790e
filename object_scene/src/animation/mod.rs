//! Per-object animation handles and their providers

mod object_animation;
mod mesh_animation;
pub(crate) mod mock_animation;

pub use object_animation::{AnimationFactory, ObjectAnimation};
pub use mesh_animation::{MeshAnimation, MeshInfo, MeshLibrary};
