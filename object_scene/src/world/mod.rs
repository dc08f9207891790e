//! World-side identifiers and placed objects
//!
//! Types the game world owns and hands to the registry.

mod object;

pub use object::{CellId, LightDesc, ObjectId, ObjectKind, WorldObject};
