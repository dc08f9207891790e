/// ObjectSceneRegistry: render-side bookkeeping for placed world objects.
///
/// Every inserted object gets a scene node under its cell's node. Its mesh
/// either stays an individually animated handle, or, for rigid statics when
/// batching is on, is folded into one of the cell's two static geometry
/// groups (small and normal) and the handle is dropped.
///
/// Per cell the registry keeps:
/// - the cell node (parent of every object node of the cell)
/// - up to two static geometry groups
/// - the union of the world bounds of every mesh inserted into the cell

use std::collections::hash_map::Entry;
use rustc_hash::FxHashMap;
use glam::Vec3;
use crate::animation::{AnimationFactory, ObjectAnimation};
use crate::error::Result;
use crate::engine_bail;
use crate::scene::{
    AABB, NodeKey, RenderQueueGroup, SceneGraph, StaticGeometry, VisibilityFlags,
};
use crate::settings::{ObjectsConfig, SettingsProvider};
use crate::world::{CellId, ObjectId, ObjectKind, WorldObject};

/// Size of a single static geometry batch region.
///
/// Larger regions pick lights less accurately and cull worse; smaller ones
/// produce more batches.
pub const STATIC_GEOMETRY_REGION_SIZE: Vec3 = Vec3::splat(2500.0);

/// Which static geometry group of a cell an object goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    /// Culled at the small object distance
    Small,
    Normal,
}

impl SizeClass {
    /// Classify an object from its largest scaled extent.
    ///
    /// Doors are never small: fading them out leaves holes in walls.
    pub fn classify(kind: &ObjectKind, largest_extent: f32, config: &ObjectsConfig) -> Self {
        let small = largest_extent < config.small_object_size
            && config.limit_small_object_distance
            && !kind.is_door();
        if small {
            SizeClass::Small
        } else {
            SizeClass::Normal
        }
    }

    pub fn visibility_flags(self) -> VisibilityFlags {
        match self {
            SizeClass::Small => VisibilityFlags::STATICS_SMALL,
            SizeClass::Normal => VisibilityFlags::STATICS,
        }
    }
}

/// Animation handle of an object that was not batched
struct LiveObject {
    cell: CellId,
    animation: Box<dyn ObjectAnimation>,
}

/// Render state of all inserted world objects.
///
/// Single-threaded: every mutating call takes `&mut self` and runs to completion.
pub struct ObjectSceneRegistry<G: SceneGraph> {
    graph: G,
    root_node: NodeKey,
    config: ObjectsConfig,
    animations: Box<dyn AnimationFactory>,
    cell_nodes: FxHashMap<CellId, NodeKey>,
    static_geometry: FxHashMap<CellId, Box<dyn StaticGeometry>>,
    static_geometry_small: FxHashMap<CellId, Box<dyn StaticGeometry>>,
    bounds: FxHashMap<CellId, AABB>,
    objects: FxHashMap<ObjectId, LiveObject>,
    /// Last id used for a static geometry name
    geometry_counter: u32,
}

impl<G: SceneGraph> ObjectSceneRegistry<G> {
    /// Create a registry that hangs cell nodes off the graph's root node
    pub fn new<F: AnimationFactory + 'static>(graph: G, animations: F, config: ObjectsConfig) -> Self {
        let root_node = graph.root_node();
        Self {
            graph,
            root_node,
            config,
            animations: Box::new(animations),
            cell_nodes: FxHashMap::default(),
            static_geometry: FxHashMap::default(),
            static_geometry_small: FxHashMap::default(),
            bounds: FxHashMap::default(),
            objects: FxHashMap::default(),
            geometry_counter: 0,
        }
    }

    /// Create a registry configured from a settings provider
    pub fn from_settings<F: AnimationFactory + 'static>(
        graph: G,
        animations: F,
        settings: &dyn SettingsProvider,
    ) -> Result<Self> {
        let config = ObjectsConfig::from_settings(settings)?;
        Ok(Self::new(graph, animations, config))
    }

    // ===== ACCESSORS =====

    pub fn scene_graph(&self) -> &G {
        &self.graph
    }

    pub fn scene_graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    pub fn config(&self) -> &ObjectsConfig {
        &self.config
    }

    pub fn root_node(&self) -> NodeKey {
        self.root_node
    }

    /// Parent for cell nodes created from now on. Existing cell nodes stay put.
    pub fn set_root_node(&mut self, root: NodeKey) {
        self.root_node = root;
    }

    /// Node grouping the objects of `cell`, if one exists
    pub fn cell_node(&self, cell: CellId) -> Option<NodeKey> {
        self.cell_nodes.get(&cell).copied()
    }

    /// Static geometry group of `cell` for `class`
    pub fn static_geometry(&self, cell: CellId, class: SizeClass) -> Option<&dyn StaticGeometry> {
        self.geometry_map(class).get(&cell).map(|sg| sg.as_ref())
    }

    pub fn has_static_geometry(&self, cell: CellId, class: SizeClass) -> bool {
        self.geometry_map(class).contains_key(&cell)
    }

    /// Number of objects with an individual animation handle
    pub fn live_object_count(&self) -> usize {
        self.objects.len()
    }

    /// Whether `id` has an individual (non-batched) animation handle
    pub fn is_live(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    fn geometry_map(&self, class: SizeClass) -> &FxHashMap<CellId, Box<dyn StaticGeometry>> {
        match class {
            SizeClass::Small => &self.static_geometry_small,
            SizeClass::Normal => &self.static_geometry,
        }
    }

    // ===== INSERTION =====

    /// Give `object` a scene node under its cell node.
    ///
    /// The node gets the object's position, uniform scale and orientation and
    /// is stored in `object.base_node`.
    pub fn insert_begin(&mut self, object: &mut WorldObject) -> Result<()> {
        let cell_node = self.ensure_cell_node(object.cell)?;
        let node = self.graph.create_child_node(cell_node)?;
        self.graph.set_transform(node, object.node_transform())?;
        object.base_node = Some(node);

        crate::engine_trace!("objscene::ObjectSceneRegistry",
            "Object {} placed in {} at {:?}", object.id, object.cell, object.position);
        Ok(())
    }

    /// Attach `mesh` to an object that went through `insert_begin`.
    ///
    /// Cell bounds and the live map are only updated once the mesh is placed.
    /// A batch fill that fails leaves the cell's group in place, possibly empty.
    pub fn insert_mesh(&mut self, object: &WorldObject, mesh: &str) -> Result<()> {
        let node = match object.base_node {
            Some(node) => node,
            None => engine_bail!(InvalidObject => "objscene::ObjectSceneRegistry",
                "Object {} has no base node; call insert_begin first", object.id),
        };
        let node_scale = match self.graph.transform(node) {
            Some(transform) => transform.scale,
            None => engine_bail!(InvalidNode => "objscene::ObjectSceneRegistry",
                "Base node {:?} of object {} does not exist", node, object.id),
        };

        let mut animation = self.animations.create_animation(&mut self.graph, object, node, mesh)?;

        let bounds = animation.world_bounds();
        let largest_extent = (bounds.size() * node_scale).max_element();
        let class = SizeClass::classify(&object.kind, largest_extent, &self.config);

        if let Some(light) = object.kind.light() {
            animation.add_light(light);
        }

        if object.kind.is_batchable() && self.config.use_static_geometry && animation.can_batch() {
            let small_distance = self.config.small_object_distance;
            let geometry = self.ensure_static_geometry(object.cell, class)?;

            if class == SizeClass::Small {
                geometry.set_rendering_distance(Some(small_distance));
            }
            geometry.set_region_dimensions(STATIC_GEOMETRY_REGION_SIZE);
            geometry.set_visibility_flags(class.visibility_flags());
            geometry.set_cast_shadows(true);
            geometry.set_render_queue_group(RenderQueueGroup::Main);

            animation.fill_batch(geometry)?;

            crate::engine_trace!("objscene::ObjectSceneRegistry",
                "Object {} ('{}') batched into {:?} static geometry of {}",
                object.id, mesh, class, object.cell);
        } else {
            self.objects.insert(object.id, LiveObject { cell: object.cell, animation });
        }

        self.bounds.entry(object.cell).or_insert(AABB::NULL).merge(&bounds);
        Ok(())
    }

    fn ensure_cell_node(&mut self, cell: CellId) -> Result<NodeKey> {
        if let Some(&node) = self.cell_nodes.get(&cell) {
            return Ok(node);
        }
        let node = self.graph.create_child_node(self.root_node)?;
        self.cell_nodes.insert(cell, node);
        crate::engine_debug!("objscene::ObjectSceneRegistry", "Created node for {}", cell);
        Ok(node)
    }

    fn ensure_static_geometry(&mut self, cell: CellId, class: SizeClass) -> Result<&mut dyn StaticGeometry> {
        let map = match class {
            SizeClass::Small => &mut self.static_geometry_small,
            SizeClass::Normal => &mut self.static_geometry,
        };

        let geometry = match map.entry(cell) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.geometry_counter += 1;
                let name = format!("sg{}", self.geometry_counter);
                let geometry = self.graph.create_static_geometry(&name)?;
                crate::engine_debug!("objscene::ObjectSceneRegistry",
                    "Created {:?} static geometry '{}' for {}", class, name, cell);
                entry.insert(geometry)
            }
        };
        Ok(geometry.as_mut())
    }

    // ===== REMOVAL =====

    /// Drop the render state of one object.
    ///
    /// Returns `false` if the object has no base node.
    pub fn delete_object(&mut self, object: &mut WorldObject) -> bool {
        let node = match object.base_node.take() {
            Some(node) => node,
            None => return false,
        };

        self.objects.remove(&object.id);
        self.graph.destroy_node(node);

        crate::engine_trace!("objscene::ObjectSceneRegistry", "Object {} deleted", object.id);
        true
    }

    /// Drop everything belonging to `cell`. Calling it again is a no-op.
    pub fn remove_cell(&mut self, cell: CellId) {
        let before = self.objects.len();
        self.objects.retain(|_, live| live.cell != cell);
        let dropped = before - self.objects.len();

        if let Some(geometry) = self.static_geometry.remove(&cell) {
            self.graph.destroy_static_geometry(geometry);
        }
        if let Some(geometry) = self.static_geometry_small.remove(&cell) {
            self.graph.destroy_static_geometry(geometry);
        }

        self.bounds.remove(&cell);

        if let Some(node) = self.cell_nodes.remove(&cell) {
            self.graph.destroy_all_children(node);
            self.graph.destroy_node(node);
            crate::engine_debug!("objscene::ObjectSceneRegistry",
                "Removed {} ({} live objects dropped)", cell, dropped);
        }
    }

    // ===== STATIC GEOMETRY =====

    /// Build the static geometry groups of `cell`, once all its objects are in.
    pub fn build_static_geometry(&mut self, cell: CellId) -> Result<()> {
        if let Some(geometry) = self.static_geometry.get_mut(&cell) {
            geometry.build()?;
        }
        if let Some(geometry) = self.static_geometry_small.get_mut(&cell) {
            geometry.build()?;
        }
        Ok(())
    }

    /// Destroy and rebuild every static geometry group.
    pub fn rebuild_static_geometry(&mut self) -> Result<()> {
        for geometry in self.static_geometry.values_mut().chain(self.static_geometry_small.values_mut()) {
            geometry.destroy();
            geometry.build()?;
        }
        Ok(())
    }

    /// Re-read the configuration and apply it to existing groups.
    ///
    /// Size classes and batching decisions already taken stay as they are;
    /// small groups pick up the new rendering distance and everything is rebuilt.
    pub fn apply_settings(&mut self, settings: &dyn SettingsProvider) -> Result<()> {
        let config = ObjectsConfig::from_settings(settings)?;
        if config == self.config {
            return Ok(());
        }

        for geometry in self.static_geometry_small.values_mut() {
            geometry.set_rendering_distance(Some(config.small_object_distance));
        }
        self.config = config;

        crate::engine_info!("objscene::ObjectSceneRegistry", "Settings changed: {:?}", self.config);
        self.rebuild_static_geometry()
    }

    // ===== QUERIES & PER-FRAME =====

    /// Union of the bounds of every mesh inserted into `cell`; null if none.
    pub fn bounds(&self, cell: CellId) -> AABB {
        self.bounds.get(&cell).copied().unwrap_or(AABB::NULL)
    }

    /// Switch the lights of every non-batched object on or off
    pub fn enable_lights(&mut self, enabled: bool) {
        for live in self.objects.values_mut() {
            live.animation.enable_lights(enabled);
        }
    }

    /// Advance the animations of every non-batched object
    pub fn update(&mut self, dt: f32) {
        for live in self.objects.values_mut() {
            live.animation.run_animation(dt);
        }
    }

    // ===== CELL CHANGES =====

    /// Move an object's node under the node of `new.cell`.
    ///
    /// `old` is the object as it was registered, `new` the same object after
    /// the move; `new.base_node` must be the node `insert_begin` created. The
    /// source cell's bounds and static geometry are not touched: stale bounds
    /// there are the caller's business.
    pub fn update_object_cell(&mut self, old: &WorldObject, new: &WorldObject) -> Result<()> {
        let node = match new.base_node {
            Some(node) => node,
            None => engine_bail!(InvalidObject => "objscene::ObjectSceneRegistry",
                "Object {} has no base node to move", new.id),
        };

        let cell_node = self.ensure_cell_node(new.cell)?;
        self.graph.add_child(cell_node, node)?;

        if let Some(mut live) = self.objects.remove(&old.id) {
            live.cell = new.cell;
            self.objects.insert(new.id, live);
        }

        crate::engine_trace!("objscene::ObjectSceneRegistry",
            "Object {} moved from {} to {}", new.id, old.cell, new.cell);
        Ok(())
    }
}

#[cfg(test)]
#[path = "object_registry_tests.rs"]
mod tests;
