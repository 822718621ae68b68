//! Configuration management: defaults, validation, loading from the environment.

pub mod app_config;
pub mod defaults;
pub mod validation;

pub use app_config::AppConfig;

use serde::Serialize;

/// A setting as reported by `--show-settings`.
#[derive(Debug, Clone, Serialize)]
pub struct SettingInfo {
    pub key: String,
    pub value: String,
    pub default: String,
    pub description: String,
    pub overridden: bool,
}

/// Describe every known setting with the value `config` actually uses.
///
/// `overridden` is set when that value differs from the default.
pub fn describe_settings(config: &AppConfig) -> Vec<SettingInfo> {
    let mut infos: Vec<SettingInfo> = defaults::DEFAULT_SETTINGS
        .values()
        .map(|def| {
            let value = config
                .setting_value(def.key)
                .unwrap_or_else(|| def.default.to_string());
            SettingInfo {
                key: def.key.to_string(),
                overridden: value != def.default,
                value,
                default: def.default.to_string(),
                description: def.description.to_string(),
            }
        })
        .collect();
    infos.sort_by(|a, b| a.key.cmp(&b.key));
    infos
}
