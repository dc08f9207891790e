/// Mesh-description backed animation provider.
///
/// A [`MeshLibrary`] maps mesh names to pre-extracted [`MeshInfo`] (local
/// bounds, controller and particle flags). It builds [`MeshAnimation`]
/// handles that place those bounds at the object's node.

use rustc_hash::FxHashMap;
use glam::Mat4;
use crate::error::Result;
use crate::engine_bail;
use crate::scene::{AABB, BatchEntity, NodeKey, SceneGraph, StaticGeometry, Transform};
use crate::world::{LightDesc, WorldObject};
use super::object_animation::{AnimationFactory, ObjectAnimation};

/// What the renderer needs to know about a mesh file
#[derive(Debug, Clone, PartialEq)]
pub struct MeshInfo {
    /// Bounds in mesh space
    pub local_bounds: AABB,
    /// Mesh carries keyframe or texture controllers
    pub has_controllers: bool,
    /// Mesh spawns particle systems
    pub has_particles: bool,
}

impl MeshInfo {
    /// Plain mesh without controllers or particles
    pub fn rigid(local_bounds: AABB) -> Self {
        Self {
            local_bounds,
            has_controllers: false,
            has_particles: false,
        }
    }
}

/// Animation handle for a single mesh placed at a node
#[derive(Debug, Clone)]
pub struct MeshAnimation {
    mesh: String,
    info: MeshInfo,
    world: Mat4,
    lights: Vec<LightDesc>,
    lights_enabled: bool,
    time: f32,
}

impl MeshAnimation {
    pub fn new(mesh: &str, info: MeshInfo, world: Mat4) -> Self {
        Self {
            mesh: mesh.to_string(),
            info,
            world,
            lights: Vec::new(),
            lights_enabled: true,
            time: 0.0,
        }
    }

    pub fn mesh(&self) -> &str {
        &self.mesh
    }

    pub fn lights(&self) -> &[LightDesc] {
        &self.lights
    }

    pub fn lights_enabled(&self) -> bool {
        self.lights_enabled
    }

    /// Accumulated animation time in seconds
    pub fn time(&self) -> f32 {
        self.time
    }
}

impl ObjectAnimation for MeshAnimation {
    fn world_bounds(&self) -> AABB {
        self.info.local_bounds.transformed(&self.world)
    }

    fn can_batch(&self) -> bool {
        !self.info.has_controllers && !self.info.has_particles
    }

    fn fill_batch(&self, geometry: &mut dyn StaticGeometry) -> Result<()> {
        if !self.can_batch() {
            engine_bail!(InvalidResource => "objscene::MeshAnimation",
                "Mesh '{}' has controllers or particles and cannot be batched", self.mesh);
        }
        let (scale, orientation, position) = self.world.to_scale_rotation_translation();
        geometry.add_entity(BatchEntity {
            mesh: self.mesh.clone(),
            transform: Transform { position, scale, orientation },
            bounds: self.world_bounds(),
        });
        Ok(())
    }

    fn add_light(&mut self, light: &LightDesc) {
        self.lights.push(*light);
    }

    fn enable_lights(&mut self, enabled: bool) {
        self.lights_enabled = enabled;
    }

    fn run_animation(&mut self, dt: f32) {
        if self.info.has_controllers || self.lights.iter().any(|l| l.animated) {
            self.time += dt;
        }
    }
}

/// Catalog of known meshes; the [`AnimationFactory`] of the crate.
#[derive(Debug, Clone, Default)]
pub struct MeshLibrary {
    meshes: FxHashMap<String, MeshInfo>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a mesh description
    pub fn register_mesh(&mut self, name: &str, info: MeshInfo) {
        self.meshes.insert(name.to_string(), info);
    }

    pub fn mesh(&self, name: &str) -> Option<&MeshInfo> {
        self.meshes.get(name)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}

impl AnimationFactory for MeshLibrary {
    fn create_animation(
        &mut self,
        graph: &mut dyn SceneGraph,
        object: &WorldObject,
        node: NodeKey,
        mesh: &str,
    ) -> Result<Box<dyn ObjectAnimation>> {
        let info = match self.meshes.get(mesh) {
            Some(info) => info.clone(),
            None => engine_bail!(InvalidResource => "objscene::MeshLibrary",
                "Mesh '{}' for object {} is not registered", mesh, object.id),
        };
        let world = match graph.world_matrix(node) {
            Some(world) => world,
            None => engine_bail!(InvalidNode => "objscene::MeshLibrary",
                "Node {:?} of object {} does not exist", node, object.id),
        };
        Ok(Box::new(MeshAnimation::new(mesh, info, world)))
    }
}

#[cfg(test)]
#[path = "mesh_animation_tests.rs"]
mod tests;
