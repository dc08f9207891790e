/// Axis-aligned bounding boxes.
///
/// Per-cell bounds are accumulated by merging object bounds into a box that
/// starts out null (contains nothing), so the null state is part of the type.

use glam::{Mat4, Vec3};

/// Axis-Aligned Bounding Box
///
/// A box with `min > max` on any axis is null. Use [`AABB::NULL`] as the
/// identity for [`AABB::merge`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// The empty box: merging anything into it yields that thing.
    pub const NULL: AABB = AABB {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` with half-size `half_extents`
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn is_null(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow this box to also enclose `other`. Null boxes are ignored.
    pub fn merge(&mut self, other: &AABB) {
        if other.is_null() {
            return;
        }
        if self.is_null() {
            *self = *other;
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Union of two boxes
    pub fn merged(mut self, other: &AABB) -> AABB {
        self.merge(other);
        self
    }

    /// Edge lengths; zero for a null box
    pub fn size(&self) -> Vec3 {
        if self.is_null() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Largest edge length
    pub fn max_extent(&self) -> f32 {
        self.size().max_element()
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Transform this box by a matrix, returning the enclosing axis-aligned box.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the box extents
    /// for a tight result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        if self.is_null() {
            return AABB::NULL;
        }

        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Returns `true` if `other` is entirely within `self`.
    pub fn contains(&self, other: &AABB) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        self.min.x <= other.min.x && self.max.x >= other.max.x
        && self.min.y <= other.min.y && self.max.y >= other.max.y
        && self.min.z <= other.min.z && self.max.z >= other.max.z
    }
}

impl Default for AABB {
    fn default() -> Self {
        AABB::NULL
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
