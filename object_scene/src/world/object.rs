/// World objects as seen by the render side.
///
/// A WorldObject is owned by the game world. The registry reads its cell,
/// kind and placement, and writes the `base_node` slot when it gives the
/// object a scene node.

use std::fmt;
use glam::{Quat, Vec3};
use crate::scene::{NodeKey, Transform};

// ===== IDENTIFIERS =====

/// Identifier of a placed object, unique across the loaded world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// World partition unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellId {
    /// Interior cell, by index into the world's interior list
    Interior(u32),
    /// Exterior grid cell
    Exterior { x: i32, y: i32 },
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellId::Interior(index) => write!(f, "interior {}", index),
            CellId::Exterior { x, y } => write!(f, "exterior ({}, {})", x, y),
        }
    }
}

// ===== KIND =====

/// Light parameters attached to light objects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightDesc {
    /// Linear RGB
    pub color: Vec3,
    pub radius: f32,
    /// Light flickers or pulses instead of staying constant
    pub animated: bool,
}

/// What kind of record an object was placed from
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    /// Plain static mesh, the only kind eligible for batching
    Static,
    Door,
    Light(LightDesc),
    Activator,
    Container,
    Item,
    Actor,
}

impl ObjectKind {
    /// Whether objects of this kind may be folded into static geometry
    pub fn is_batchable(&self) -> bool {
        matches!(self, ObjectKind::Static)
    }

    pub fn is_door(&self) -> bool {
        matches!(self, ObjectKind::Door)
    }

    pub fn light(&self) -> Option<&LightDesc> {
        match self {
            ObjectKind::Light(desc) => Some(desc),
            _ => None,
        }
    }
}

// ===== WORLD OBJECT =====

/// A placed object
#[derive(Debug, Clone)]
pub struct WorldObject {
    pub id: ObjectId,
    pub cell: CellId,
    pub kind: ObjectKind,
    /// World position
    pub position: Vec3,
    /// Euler angles in radians, in the world data's axis convention
    pub rotation: Vec3,
    /// Uniform scale
    pub scale: f32,
    /// Scene node assigned by the registry; `None` until inserted
    pub base_node: Option<NodeKey>,
}

impl WorldObject {
    /// Object at `position` with no rotation and unit scale
    pub fn new(id: ObjectId, cell: CellId, kind: ObjectKind, position: Vec3) -> Self {
        Self {
            id,
            cell,
            kind,
            position,
            rotation: Vec3::ZERO,
            scale: 1.0,
            base_node: None,
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Node orientation for the stored euler angles.
    ///
    /// The world data rotates the other way around each axis, so every angle
    /// is negated. The product is X * Y * Z: applied to a vector, Z rotates
    /// first, then Y, then X. Saved positions depend on this order.
    pub fn orientation(&self) -> Quat {
        let xr = Quat::from_axis_angle(Vec3::X, -self.rotation.x);
        let yr = Quat::from_axis_angle(Vec3::Y, -self.rotation.y);
        let zr = Quat::from_axis_angle(Vec3::Z, -self.rotation.z);
        xr * yr * zr
    }

    /// Local transform of the object's scene node
    pub fn node_transform(&self) -> Transform {
        Transform {
            position: self.position,
            scale: Vec3::splat(self.scale),
            orientation: self.orientation(),
        }
    }
}

#[cfg(test)]
#[path = "object_tests.rs"]
mod tests;
