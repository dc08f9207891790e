/// Scene graph abstraction consumed by the object registry.
///
/// The registry never touches nodes directly: it asks a [`SceneGraph`] to
/// create, reparent, transform and destroy them, and to hand out static
/// geometry groups. [`SceneTree`](super::SceneTree) is the in-crate
/// implementation; a rendering backend can provide its own.

use glam::{Mat4, Quat, Vec3};
use slotmap::new_key_type;
use crate::error::Result;
use super::static_geometry::StaticGeometry;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a node within a SceneGraph.
    ///
    /// A key becomes invalid only when its own node is destroyed; graph
    /// operations on an invalid key report an error or return `false`.
    pub struct NodeKey;
}

// ===== TRANSFORM =====

/// Local transform of a scene node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
    pub orientation: Quat,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        scale: Vec3::ONE,
        orientation: Quat::IDENTITY,
    };

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

// ===== SCENE GRAPH TRAIT =====

/// Node hierarchy plus static-geometry factory.
///
/// Destroying a node detaches it from its parent; its children are detached
/// too but stay alive. Use `destroy_all_children` first to tear down a subtree.
pub trait SceneGraph {
    /// Node every cell node hangs off by default
    fn root_node(&self) -> NodeKey;

    /// Create a new node attached under `parent`
    fn create_child_node(&mut self, parent: NodeKey) -> Result<NodeKey>;

    /// Attach `child` under `parent`, detaching it from its current parent first
    fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()>;

    /// Parent of `node`, `None` for detached nodes or invalid keys
    fn parent(&self, node: NodeKey) -> Option<NodeKey>;

    /// Set the local transform of `node`
    fn set_transform(&mut self, node: NodeKey, transform: Transform) -> Result<()>;

    /// Local transform of `node`
    fn transform(&self, node: NodeKey) -> Option<Transform>;

    /// Transform from node space to the space of its topmost ancestor
    fn world_matrix(&self, node: NodeKey) -> Option<Mat4>;

    /// Whether `node` is a live node of this graph
    fn contains_node(&self, node: NodeKey) -> bool;

    /// Destroy a single node. Returns false if the key is invalid.
    fn destroy_node(&mut self, node: NodeKey) -> bool;

    /// Destroy every descendant of `node`, keeping `node` itself
    fn destroy_all_children(&mut self, node: NodeKey);

    /// Create an empty static geometry group with a graph-unique name
    fn create_static_geometry(&mut self, name: &str) -> Result<Box<dyn StaticGeometry>>;

    /// Release a group created by `create_static_geometry`
    fn destroy_static_geometry(&mut self, geometry: Box<dyn StaticGeometry>);
}
