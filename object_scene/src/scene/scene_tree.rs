/// SceneTree: slotmap-backed node hierarchy implementing [`SceneGraph`].
///
/// Nodes are stored in a SlotMap for O(1) insert/remove with stable keys.
/// Static geometry groups are [`BatchedGeometry`] values; the tree only tracks
/// their names so no two live groups share one.

use rustc_hash::FxHashSet;
use slotmap::SlotMap;
use glam::Mat4;
use crate::error::Result;
use crate::engine_bail;
use super::batched_geometry::BatchedGeometry;
use super::scene_graph::{NodeKey, SceneGraph, Transform};
use super::static_geometry::StaticGeometry;

struct SceneNode {
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    transform: Transform,
}

impl SceneNode {
    fn new(parent: Option<NodeKey>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            transform: Transform::IDENTITY,
        }
    }
}

/// In-memory scene graph.
pub struct SceneTree {
    nodes: SlotMap<NodeKey, SceneNode>,
    root: NodeKey,
    /// Names of live static geometry groups
    geometry_names: FxHashSet<String>,
}

impl SceneTree {
    /// Create a tree holding only the root node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new(None));
        Self {
            nodes,
            root,
            geometry_names: FxHashSet::default(),
        }
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Children of `node` in attach order (empty for invalid keys)
    pub fn children(&self, node: NodeKey) -> &[NodeKey] {
        self.nodes.get(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Number of live static geometry groups
    pub fn static_geometry_count(&self) -> usize {
        self.geometry_names.len()
    }

    pub fn has_static_geometry(&self, name: &str) -> bool {
        self.geometry_names.contains(name)
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    fn is_ancestor_or_self(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        let mut current = Some(node);
        while let Some(key) = current {
            if key == ancestor {
                return true;
            }
            current = self.nodes.get(key).and_then(|n| n.parent);
        }
        false
    }

    fn detach(&mut self, node: NodeKey) {
        let parent = match self.nodes.get_mut(node) {
            Some(n) => n.parent.take(),
            None => return,
        };
        if let Some(parent) = parent {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.retain(|&c| c != node);
            }
        }
    }
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph for SceneTree {
    fn root_node(&self) -> NodeKey {
        self.root
    }

    fn create_child_node(&mut self, parent: NodeKey) -> Result<NodeKey> {
        if !self.nodes.contains_key(parent) {
            engine_bail!(InvalidNode => "objscene::SceneTree",
                "Cannot create child: parent node {:?} does not exist", parent);
        }
        let key = self.nodes.insert(SceneNode::new(Some(parent)));
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(key);
        }
        Ok(key)
    }

    fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            engine_bail!(InvalidNode => "objscene::SceneTree",
                "Cannot attach {:?} under {:?}: node does not exist", child, parent);
        }
        if self.is_ancestor_or_self(child, parent) {
            engine_bail!(InvalidNode => "objscene::SceneTree",
                "Cannot attach {:?} under its own descendant {:?}", child, parent);
        }

        self.detach(child);
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        Ok(())
    }

    fn parent(&self, node: NodeKey) -> Option<NodeKey> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    fn set_transform(&mut self, node: NodeKey, transform: Transform) -> Result<()> {
        match self.nodes.get_mut(node) {
            Some(n) => {
                n.transform = transform;
                Ok(())
            }
            None => engine_bail!(InvalidNode => "objscene::SceneTree",
                "Cannot set transform: node {:?} does not exist", node),
        }
    }

    fn transform(&self, node: NodeKey) -> Option<Transform> {
        self.nodes.get(node).map(|n| n.transform)
    }

    fn world_matrix(&self, node: NodeKey) -> Option<Mat4> {
        let mut current = self.nodes.get(node)?;
        let mut matrix = current.transform.to_matrix();
        while let Some(parent) = current.parent {
            current = self.nodes.get(parent)?;
            matrix = current.transform.to_matrix() * matrix;
        }
        Some(matrix)
    }

    fn contains_node(&self, node: NodeKey) -> bool {
        self.nodes.contains_key(node)
    }

    fn destroy_node(&mut self, node: NodeKey) -> bool {
        if node == self.root || !self.nodes.contains_key(node) {
            return false;
        }
        self.detach(node);
        if let Some(removed) = self.nodes.remove(node) {
            for child in removed.children {
                if let Some(c) = self.nodes.get_mut(child) {
                    c.parent = None;
                }
            }
        }
        true
    }

    fn destroy_all_children(&mut self, node: NodeKey) {
        let mut pending = match self.nodes.get_mut(node) {
            Some(n) => std::mem::take(&mut n.children),
            None => return,
        };
        while let Some(key) = pending.pop() {
            if let Some(removed) = self.nodes.remove(key) {
                pending.extend(removed.children);
            }
        }
    }

    fn create_static_geometry(&mut self, name: &str) -> Result<Box<dyn StaticGeometry>> {
        if !self.geometry_names.insert(name.to_string()) {
            engine_bail!(InvalidResource => "objscene::SceneTree",
                "Static geometry '{}' already exists", name);
        }
        Ok(Box::new(BatchedGeometry::new(name)))
    }

    fn destroy_static_geometry(&mut self, mut geometry: Box<dyn StaticGeometry>) {
        geometry.destroy();
        self.geometry_names.remove(geometry.name());
    }
}

#[cfg(test)]
#[path = "scene_tree_tests.rs"]
mod tests;
