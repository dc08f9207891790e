/// Mock animation provider for unit tests.
///
/// Every handle reports into a shared [`MockAnimationLog`] keyed by object id,
/// so tests can see which objects were updated, lit, batched or dropped after
/// the registry has taken ownership of the handles.

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;
#[cfg(test)]
use rustc_hash::FxHashMap;
#[cfg(test)]
use crate::error::Result;
#[cfg(test)]
use crate::engine_bail;
#[cfg(test)]
use crate::scene::{AABB, BatchEntity, NodeKey, SceneGraph, StaticGeometry};
#[cfg(test)]
use crate::world::{LightDesc, ObjectId, WorldObject};
#[cfg(test)]
use super::object_animation::{AnimationFactory, ObjectAnimation};

// ============================================================================
// Mock state
// ============================================================================

/// Observed state of one handle
#[cfg(test)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockAnimationState {
    pub mesh: String,
    pub lights: Vec<LightDesc>,
    pub lights_enabled: Option<bool>,
    pub elapsed: f32,
    pub update_calls: u32,
    pub batched: bool,
    pub dropped: bool,
}

#[cfg(test)]
pub type MockAnimationLog = Rc<RefCell<FxHashMap<ObjectId, MockAnimationState>>>;

// ============================================================================
// Mock animation
// ============================================================================

#[cfg(test)]
pub struct MockAnimation {
    id: ObjectId,
    mesh: String,
    bounds: AABB,
    can_batch: bool,
    fails_batch: bool,
    log: MockAnimationLog,
}

#[cfg(test)]
impl MockAnimation {
    fn with_state<F: FnOnce(&mut MockAnimationState)>(&self, f: F) {
        let mut log = self.log.borrow_mut();
        f(log.entry(self.id).or_default());
    }
}

#[cfg(test)]
impl ObjectAnimation for MockAnimation {
    fn world_bounds(&self) -> AABB {
        self.bounds
    }

    fn can_batch(&self) -> bool {
        self.can_batch
    }

    fn fill_batch(&self, geometry: &mut dyn StaticGeometry) -> Result<()> {
        if self.fails_batch {
            engine_bail!("objscene::mock", "Mock mesh '{}' refused to batch", self.mesh);
        }
        geometry.add_entity(BatchEntity {
            mesh: self.mesh.clone(),
            transform: crate::scene::Transform {
                position: self.bounds.center(),
                ..crate::scene::Transform::IDENTITY
            },
            bounds: self.bounds,
        });
        self.with_state(|s| s.batched = true);
        Ok(())
    }

    fn add_light(&mut self, light: &LightDesc) {
        self.with_state(|s| s.lights.push(*light));
    }

    fn enable_lights(&mut self, enabled: bool) {
        self.with_state(|s| s.lights_enabled = Some(enabled));
    }

    fn run_animation(&mut self, dt: f32) {
        self.with_state(|s| {
            s.elapsed += dt;
            s.update_calls += 1;
        });
    }
}

#[cfg(test)]
impl Drop for MockAnimation {
    fn drop(&mut self) {
        self.with_state(|s| s.dropped = true);
    }
}

// ============================================================================
// Mock factory
// ============================================================================

/// Mesh behaviour served by the mock factory
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct MockMesh {
    /// Bounds centered on the object's position with these half extents
    pub half_extents: glam::Vec3,
    pub can_batch: bool,
    /// `fill_batch` fails even though `can_batch` holds
    pub fails_batch: bool,
}

#[cfg(test)]
pub struct MockAnimationFactory {
    meshes: FxHashMap<String, MockMesh>,
    log: MockAnimationLog,
}

#[cfg(test)]
impl MockAnimationFactory {
    pub fn new() -> Self {
        Self {
            meshes: FxHashMap::default(),
            log: Rc::new(RefCell::new(FxHashMap::default())),
        }
    }

    pub fn with_mesh(mut self, name: &str, mesh: MockMesh) -> Self {
        self.meshes.insert(name.to_string(), mesh);
        self
    }

    /// Shared log, readable after the factory moved into a registry
    pub fn log(&self) -> MockAnimationLog {
        Rc::clone(&self.log)
    }
}

#[cfg(test)]
impl AnimationFactory for MockAnimationFactory {
    fn create_animation(
        &mut self,
        _graph: &mut dyn SceneGraph,
        object: &WorldObject,
        _node: NodeKey,
        mesh: &str,
    ) -> Result<Box<dyn ObjectAnimation>> {
        let desc = match self.meshes.get(mesh) {
            Some(desc) => *desc,
            None => engine_bail!(InvalidResource => "objscene::mock", "Unknown mock mesh '{}'", mesh),
        };
        self.log.borrow_mut().insert(object.id, MockAnimationState {
            mesh: mesh.to_string(),
            ..MockAnimationState::default()
        });
        Ok(Box::new(MockAnimation {
            id: object.id,
            mesh: mesh.to_string(),
            bounds: AABB::from_center_half_extents(object.position, desc.half_extents),
            can_batch: desc.can_batch,
            fails_batch: desc.fails_batch,
            log: Rc::clone(&self.log),
        }))
    }
}
