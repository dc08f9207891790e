//! Unit tests for error.rs
//!
//! Tests Error variants, their Display text, and the engine_err!/engine_bail! macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_node_display() {
    let err = Error::InvalidNode("node 3v1 was destroyed".to_string());
    let display = format!("{}", err);
    assert!(display.starts_with("Invalid node"));
    assert!(display.contains("node 3v1 was destroyed"));
}

#[test]
fn test_invalid_object_display() {
    let err = Error::InvalidObject("object 12 has no base node".to_string());
    assert_eq!(format!("{}", err), "Invalid object: object 12 has no base node");
}

#[test]
fn test_invalid_setting_display() {
    let err = Error::InvalidSetting("[Objects] use static geometry".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid setting"));
    assert!(display.contains("use static geometry"));
}

#[test]
fn test_invalid_resource_and_backend_display() {
    let res = Error::InvalidResource("sg4".to_string());
    assert_eq!(format!("{}", res), "Invalid resource: sg4");

    let backend = Error::BackendError("mesh 'x.nif' failed to load".to_string());
    assert_eq!(format!("{}", backend), "Backend error: mesh 'x.nif' failed to load");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidNode("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_clone_and_eq() {
    let err = Error::InvalidSetting("missing".to_string());
    assert_eq!(err.clone(), err);
    assert_ne!(err, Error::InvalidResource("missing".to_string()));
}

// ============================================================================
// MACRO TESTS
// ============================================================================

#[test]
fn test_engine_err_defaults_to_backend_error() {
    let err = crate::engine_err!("objscene::test", "code {}", 7);
    assert_eq!(err, Error::BackendError("code 7".to_string()));
}

#[test]
fn test_engine_err_with_explicit_variant() {
    let err = crate::engine_err!(InvalidNode => "objscene::test", "key {}", "1v1");
    assert_eq!(err, Error::InvalidNode("key 1v1".to_string()));
}

#[test]
fn test_engine_bail_returns_error() {
    fn fails(flag: bool) -> Result<u32> {
        if flag {
            crate::engine_bail!(InvalidObject => "objscene::test", "flag was set");
        }
        Ok(1)
    }

    assert_eq!(fails(false), Ok(1));
    assert_eq!(fails(true), Err(Error::InvalidObject("flag was set".to_string())));
}

// ============================================================================
// ERROR PROPAGATION TESTS
// ============================================================================

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::InvalidResource("inner".to_string()))
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert_eq!(outer(), Err(Error::InvalidResource("inner".to_string())));
}
