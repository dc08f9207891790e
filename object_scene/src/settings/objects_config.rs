/// Typed view of the settings the object registry depends on.

use crate::error::Result;
use super::settings::SettingsProvider;

/// Object registry tuning
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectsConfig {
    /// Objects whose largest scaled extent is below this are "small"
    pub small_object_size: f32,
    /// Rendering distance of small static geometry groups
    pub small_object_distance: f32,
    /// Enables the small object class at all
    pub limit_small_object_distance: bool,
    /// Enables folding static objects into static geometry
    pub use_static_geometry: bool,
}

impl ObjectsConfig {
    pub const CATEGORY_VIEWING_DISTANCE: &'static str = "Viewing distance";
    pub const CATEGORY_OBJECTS: &'static str = "Objects";

    /// Read every field from `provider`; missing or mistyped values are errors
    pub fn from_settings(provider: &dyn SettingsProvider) -> Result<Self> {
        Ok(Self {
            small_object_size: provider.get_float(Self::CATEGORY_VIEWING_DISTANCE, "small object size")?,
            small_object_distance: provider.get_float(Self::CATEGORY_VIEWING_DISTANCE, "small object distance")?,
            limit_small_object_distance: provider.get_bool(Self::CATEGORY_VIEWING_DISTANCE, "limit small object distance")?,
            use_static_geometry: provider.get_bool(Self::CATEGORY_OBJECTS, "use static geometry")?,
        })
    }
}

impl Default for ObjectsConfig {
    fn default() -> Self {
        Self {
            small_object_size: 250.0,
            small_object_distance: 3500.0,
            limit_small_object_distance: false,
            use_static_geometry: true,
        }
    }
}
