//! Integration tests for ObjectSceneRegistry
//!
//! Drives the registry through the public API with the in-memory scene tree
//! and mesh library, configured from settings text.
//!
//! Run with: cargo test --test registry_integration_tests

use object_scene::glam::Vec3;
use object_scene::objscene::{Error, ObjectSceneRegistry, SizeClass};
use object_scene::objscene::animation::{MeshInfo, MeshLibrary};
use object_scene::objscene::scene::{AABB, SceneGraph, SceneTree, VisibilityFlags};
use object_scene::objscene::settings::Settings;
use object_scene::objscene::world::{CellId, LightDesc, ObjectId, ObjectKind, WorldObject};

// ============================================================================
// Helpers
// ============================================================================

const SETTINGS: &str = r#"
[Objects]
"use static geometry" = true

["Viewing distance"]
"small object size" = 250
"small object distance" = 3000
"limit small object distance" = true
"#;

const BALMORA: CellId = CellId::Exterior { x: -3, y: -2 };

fn library() -> MeshLibrary {
    let mut library = MeshLibrary::new();
    library.register_mesh("wall.nif", MeshInfo::rigid(AABB::new(Vec3::splat(-500.0), Vec3::splat(500.0))));
    library.register_mesh("cup.nif", MeshInfo::rigid(AABB::new(Vec3::splat(-5.0), Vec3::splat(5.0))));
    library.register_mesh("door.nif", MeshInfo::rigid(AABB::new(Vec3::splat(-50.0), Vec3::splat(50.0))));
    library.register_mesh("flame.nif", MeshInfo {
        local_bounds: AABB::new(Vec3::splat(-10.0), Vec3::splat(10.0)),
        has_controllers: false,
        has_particles: true,
    });
    library
}

fn registry() -> ObjectSceneRegistry<SceneTree> {
    let settings = Settings::parse(SETTINGS).unwrap();
    ObjectSceneRegistry::from_settings(SceneTree::new(), library(), &settings).unwrap()
}

fn place(
    registry: &mut ObjectSceneRegistry<SceneTree>,
    id: u64,
    kind: ObjectKind,
    at: Vec3,
    mesh: &str,
) -> WorldObject {
    let mut object = WorldObject::new(ObjectId(id), BALMORA, kind, at);
    registry.insert_begin(&mut object).unwrap();
    registry.insert_mesh(&object, mesh).unwrap();
    object
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_integration_cell_lifecycle() {
    let mut registry = registry();

    place(&mut registry, 1, ObjectKind::Static, Vec3::new(1000.0, 0.0, 0.0), "wall.nif");
    place(&mut registry, 2, ObjectKind::Static, Vec3::new(0.0, 200.0, 0.0), "cup.nif");
    let torch = place(
        &mut registry,
        3,
        ObjectKind::Light(LightDesc { color: Vec3::new(1.0, 0.8, 0.5), radius: 300.0, animated: true }),
        Vec3::new(0.0, 0.0, 100.0),
        "flame.nif",
    );
    place(&mut registry, 4, ObjectKind::Door, Vec3::ZERO, "door.nif");

    registry.build_static_geometry(BALMORA).unwrap();

    let normal = registry.static_geometry(BALMORA, SizeClass::Normal).unwrap();
    assert!(normal.is_built());
    assert_eq!(normal.visibility_flags(), VisibilityFlags::STATICS);
    assert_eq!(normal.queued_entities().len(), 1);

    let small = registry.static_geometry(BALMORA, SizeClass::Small).unwrap();
    assert_eq!(small.rendering_distance(), Some(3000.0));
    assert_eq!(small.queued_entities()[0].mesh, "cup.nif");

    // The flame has particles and the door is not a static
    assert_eq!(registry.live_object_count(), 2);
    assert!(registry.is_live(torch.id));
    assert!(registry.is_live(ObjectId(4)));

    let bounds = registry.bounds(BALMORA);
    assert_eq!(bounds.min, Vec3::new(-50.0, -500.0, -500.0));
    assert_eq!(bounds.max, Vec3::new(1500.0, 500.0, 500.0));

    registry.update(0.016);
    registry.enable_lights(false);

    registry.remove_cell(BALMORA);
    assert_eq!(registry.live_object_count(), 0);
    assert!(registry.bounds(BALMORA).is_null());
    assert_eq!(registry.scene_graph().node_count(), 1);
    assert_eq!(registry.scene_graph().static_geometry_count(), 0);
}

#[test]
fn test_integration_mesh_follows_node_transform() {
    let mut registry = registry();
    let object = place(&mut registry, 1, ObjectKind::Item, Vec3::new(10.0, 20.0, 30.0), "cup.nif");

    let node = object.base_node.unwrap();
    let world = registry.scene_graph().world_matrix(node).unwrap();
    assert_eq!(world.transform_point3(Vec3::ZERO), Vec3::new(10.0, 20.0, 30.0));
    assert_eq!(registry.bounds(BALMORA).center(), Vec3::new(10.0, 20.0, 30.0));
}

#[test]
fn test_integration_unknown_mesh_is_reported() {
    let mut registry = registry();
    let mut object = WorldObject::new(ObjectId(9), BALMORA, ObjectKind::Static, Vec3::ZERO);
    registry.insert_begin(&mut object).unwrap();

    let result = registry.insert_mesh(&object, "missing.nif");
    assert!(matches!(result, Err(Error::InvalidResource(_))));

    // The node exists and can still be deleted
    assert!(registry.delete_object(&mut object));
    assert!(!registry.delete_object(&mut object));
}

#[test]
fn test_integration_rebuild_after_settings_change() {
    let mut registry = registry();
    place(&mut registry, 1, ObjectKind::Static, Vec3::ZERO, "cup.nif");
    registry.build_static_geometry(BALMORA).unwrap();
    let before = registry.static_geometry(BALMORA, SizeClass::Small).unwrap().regions();

    let mut settings = Settings::parse(SETTINGS).unwrap();
    settings.merge_str("[\"Viewing distance\"]\n\"small object distance\" = 1500\n").unwrap();
    registry.apply_settings(&settings).unwrap();

    let small = registry.static_geometry(BALMORA, SizeClass::Small).unwrap();
    assert_eq!(small.rendering_distance(), Some(1500.0));
    assert_eq!(small.regions(), before);
}

#[test]
fn test_integration_object_moves_between_cells() {
    let mut registry = registry();
    let old = place(&mut registry, 1, ObjectKind::Actor, Vec3::ZERO, "cup.nif");

    let mut new = old.clone();
    new.cell = CellId::Interior(12);
    registry.update_object_cell(&old, &new).unwrap();

    registry.remove_cell(BALMORA);
    assert!(registry.is_live(ObjectId(1)));

    let node = new.base_node.unwrap();
    let interior = registry.cell_node(CellId::Interior(12)).unwrap();
    assert_eq!(registry.scene_graph().parent(node), Some(interior));
}
