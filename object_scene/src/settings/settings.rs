/// Named tuning values grouped by category.
///
/// Values are addressed by `(category, key)`, e.g.
/// `("Viewing distance", "small object size")`. [`Settings`] is an in-memory
/// store that can be filled programmatically or parsed from TOML, one table
/// per category:
///
/// ```text
/// [Objects]
/// "use static geometry" = true
///
/// ["Viewing distance"]
/// "small object size" = 250
/// ```

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use crate::error::Result;
use crate::{engine_bail, engine_err};

/// A single setting value
pub use toml::Value as SettingValue;

/// Source of named tuning values.
pub trait SettingsProvider {
    /// Raw value, `None` if unset
    fn get(&self, category: &str, key: &str) -> Option<&SettingValue>;

    /// Numeric value; integers are widened
    fn get_float(&self, category: &str, key: &str) -> Result<f32> {
        read_setting(self.get(category, key), category, key, "a number")
    }

    fn get_bool(&self, category: &str, key: &str) -> Result<bool> {
        read_setting(self.get(category, key), category, key, "a boolean")
    }
}

/// Deserialize a raw value into `T`, logging what was found on mismatch
fn read_setting<T: DeserializeOwned>(
    value: Option<&SettingValue>,
    category: &str,
    key: &str,
    expected: &str,
) -> Result<T> {
    let value = match value {
        Some(value) => value.clone(),
        None => engine_bail!(InvalidSetting => "objscene::Settings",
            "[{}] {} is not set", category, key),
    };
    let found = value.type_str();
    value.try_into().map_err(|_| engine_err!(InvalidSetting => "objscene::Settings",
        "[{}] {} is {}, expected {}", category, key, found, expected))
}

/// In-memory settings store: category name to table of values
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    categories: FxHashMap<String, toml::Table>,
}

impl Settings {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the defaults the object registry reads
    pub fn with_defaults() -> Self {
        let mut settings = Self::new();
        settings.set("Viewing distance", "small object size", 250_i64);
        settings.set("Viewing distance", "small object distance", 3500_i64);
        settings.set("Viewing distance", "limit small object distance", false);
        settings.set("Objects", "use static geometry", true);
        settings
    }

    /// Set (or replace) a value
    pub fn set(&mut self, category: &str, key: &str, value: impl Into<SettingValue>) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.categories.values().map(|table| table.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse TOML text into a new store.
    ///
    /// Every top-level entry must be a category table.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| engine_err!(InvalidSetting => "objscene::Settings",
            "Failed to parse settings: {}", e))
    }

    /// Parse TOML text on top of the current values
    pub fn merge_str(&mut self, text: &str) -> Result<()> {
        let overrides = Self::parse(text)?;
        for (category, table) in overrides.categories {
            self.categories.entry(category).or_default().extend(table);
        }
        Ok(())
    }
}

impl SettingsProvider for Settings {
    fn get(&self, category: &str, key: &str) -> Option<&SettingValue> {
        self.categories.get(category)?.get(key)
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
