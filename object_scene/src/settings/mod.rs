//! Configuration: named settings and the typed registry config

mod settings;
mod objects_config;

pub use settings::{SettingValue, Settings, SettingsProvider};
pub use objects_config::ObjectsConfig;
