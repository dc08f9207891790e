/// Per-object animation handles.
///
/// An ObjectAnimation owns whatever the renderer attached to an object's node
/// (entities, particle systems, lights) and drives it every frame. Dropping
/// the handle releases all of it.

use crate::error::Result;
use crate::scene::{AABB, NodeKey, SceneGraph, StaticGeometry};
use crate::world::{LightDesc, WorldObject};

/// Render state of one inserted object.
pub trait ObjectAnimation {
    /// World-space bounds of everything attached to the object
    fn world_bounds(&self) -> AABB;

    /// Whether the object's geometry can be folded into static geometry
    /// (no skinning, no controllers, no particles)
    fn can_batch(&self) -> bool;

    /// Queue the object's geometry into `geometry`
    fn fill_batch(&self, geometry: &mut dyn StaticGeometry) -> Result<()>;

    /// Attach a light source to the object
    fn add_light(&mut self, light: &LightDesc);

    /// Switch attached lights on or off
    fn enable_lights(&mut self, enabled: bool);

    /// Advance animations by `dt` seconds
    fn run_animation(&mut self, dt: f32);
}

/// Builds animation handles for objects entering the scene.
pub trait AnimationFactory {
    /// Load `mesh` for `object` and attach it to `node`
    fn create_animation(
        &mut self,
        graph: &mut dyn SceneGraph,
        object: &WorldObject,
        node: NodeKey,
        mesh: &str,
    ) -> Result<Box<dyn ObjectAnimation>>;
}
