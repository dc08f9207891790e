//! Error types for the object scene registry
//!
//! Scene-graph, static-geometry and settings failures all surface as
//! [`Error`]. The `engine_err!` / `engine_bail!` macros log the failure through
//! the engine logger before handing it back to the caller.

use std::fmt;

/// Result type for object scene operations
pub type Result<T> = std::result::Result<T, Error>;

/// Object scene errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Scene node key is stale or was never created by this graph
    InvalidNode(String),

    /// World object is not in the state the operation requires (e.g. no base node)
    InvalidObject(String),

    /// Setting is missing or has the wrong type
    InvalidSetting(String),

    /// Static geometry group or animation resource is unusable
    InvalidResource(String),

    /// Failure reported by a scene-graph or animation backend
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidNode(msg) => write!(f, "Invalid node: {}", msg),
            Error::InvalidObject(msg) => write!(f, "Invalid object: {}", msg),
            Error::InvalidSetting(msg) => write!(f, "Invalid setting: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error and build an [`Error`] value.
///
/// The variant defaults to `BackendError`; prefix with `Variant =>` to pick another.
///
/// # Example
///
/// ```ignore
/// return Err(engine_err!(InvalidNode => "objscene::SceneTree", "Node {:?} not found", key));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($kind:ident => $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::objscene::Error::$kind(message)
    }};
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::objscene::Error::BackendError(message)
    }};
}

/// Log an error and return it from the enclosing function.
#[macro_export]
macro_rules! engine_bail {
    ($kind:ident => $source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($kind => $source, $($arg)*))
    };
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
