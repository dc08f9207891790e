//! Integration tests for Engine logging
//!
//! Checks the pluggable logger and the entries the registry emits.
//!
//! Run with: cargo test --test logging_integration_tests

use object_scene::glam::Vec3;
use object_scene::objscene::{Engine, ObjectSceneRegistry};
use object_scene::objscene::animation::{MeshInfo, MeshLibrary};
use object_scene::objscene::log::{Logger, LogEntry, LogSeverity};
use object_scene::objscene::scene::{AABB, SceneTree};
use object_scene::objscene::settings::{Settings, SettingsProvider};
use object_scene::objscene::world::{CellId, ObjectId, ObjectKind, WorldObject};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn registry() -> ObjectSceneRegistry<SceneTree> {
    let mut library = MeshLibrary::new();
    library.register_mesh("crate.nif", MeshInfo::rigid(AABB::new(Vec3::splat(-40.0), Vec3::splat(40.0))));
    ObjectSceneRegistry::from_settings(SceneTree::new(), library, &Settings::with_defaults()).unwrap()
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].source, "test::module");
        assert_eq!(captured[1].message, "Test warning message");
        assert_eq!(captured[1].file, None);
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].file, Some("test_file.rs"));
        assert_eq!(captured[0].line, Some(42));
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());
    Engine::reset_logger();
    Engine::log(LogSeverity::Info, "test", "Message 2".to_string());

    // Only the first message reached the test logger
    assert_eq!(entries.lock().unwrap().len(), 1);
}

#[test]
#[serial]
fn test_integration_registry_failure_logs_error() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut registry = registry();
    let object = WorldObject::new(ObjectId(5), CellId::Interior(1), ObjectKind::Static, Vec3::ZERO);
    assert!(registry.insert_mesh(&object, "crate.nif").is_err());

    {
        let captured = entries.lock().unwrap();
        let error = captured
            .iter()
            .find(|e| e.severity == LogSeverity::Error)
            .expect("insert_mesh failure should be logged");
        assert_eq!(error.source, "objscene::ObjectSceneRegistry");
        assert!(error.message.contains("#5"));
        assert!(error.file.is_some());
        assert!(error.line.is_some());
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_registry_cell_events() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut registry = registry();
    let mut object = WorldObject::new(ObjectId(1), CellId::Interior(1), ObjectKind::Static, Vec3::ZERO);
    registry.insert_begin(&mut object).unwrap();
    registry.insert_mesh(&object, "crate.nif").unwrap();
    registry.remove_cell(CellId::Interior(1));

    {
        let captured = entries.lock().unwrap();
        let debug: Vec<&str> = captured
            .iter()
            .filter(|e| e.severity == LogSeverity::Debug)
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(debug.len(), 3);
        assert!(debug[0].contains("interior 1"));
        assert!(debug[1].contains("sg1"));
        assert!(debug[2].starts_with("Removed interior 1"));
        assert!(captured.iter().all(|e| e.severity != LogSeverity::Error));
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_bad_setting_logs_error() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let settings = Settings::new();
    assert!(settings.get_bool("Objects", "use static geometry").is_err());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].severity, LogSeverity::Error);
        assert_eq!(captured[0].source, "objscene::Settings");
    }

    Engine::reset_logger();
}
