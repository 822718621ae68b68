//! Runtime application configuration loaded from environment overrides.

use std::path::PathBuf;

use super::defaults::get_default;
use super::validation::validate_setting;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub output_file: PathBuf,
    pub jpeg_quality: u8,
    pub scale_min_percent: u32,
    pub scale_max_percent: u32,
    pub default_scale_percent: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_file: PathBuf::from("walmart_tryon_result.jpg"),
            jpeg_quality: 90,
            scale_min_percent: 10,
            scale_max_percent: 300,
            default_scale_percent: 100,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration, asking `lookup` for each override.
    ///
    /// Missing or invalid values fall back to their defaults (invalid ones
    /// are logged). Inconsistent scale bounds are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let g = |key: &str| -> String { effective_value(&lookup, key) };

        let defaults = Self::default();
        let scale_min_percent = parse_u32(&g("TRYON_SCALE_MIN_PERCENT"), defaults.scale_min_percent);
        let scale_max_percent = parse_u32(&g("TRYON_SCALE_MAX_PERCENT"), defaults.scale_max_percent);
        if scale_min_percent > scale_max_percent {
            anyhow::bail!(
                "TRYON_SCALE_MIN_PERCENT ({scale_min_percent}) exceeds TRYON_SCALE_MAX_PERCENT ({scale_max_percent})"
            );
        }

        let default_scale_percent =
            parse_u32(&g("TRYON_DEFAULT_SCALE_PERCENT"), defaults.default_scale_percent)
                .clamp(scale_min_percent, scale_max_percent);

        Ok(Self {
            output_file: PathBuf::from(g("TRYON_OUTPUT_FILE")),
            jpeg_quality: parse_u8(&g("TRYON_JPEG_QUALITY"), defaults.jpeg_quality),
            scale_min_percent,
            scale_max_percent,
            default_scale_percent,
        })
    }

    /// The value this configuration uses for setting `key`, as text.
    pub fn setting_value(&self, key: &str) -> Option<String> {
        let value = match key {
            "TRYON_OUTPUT_FILE" => self.output_file.display().to_string(),
            "TRYON_JPEG_QUALITY" => self.jpeg_quality.to_string(),
            "TRYON_SCALE_MIN_PERCENT" => self.scale_min_percent.to_string(),
            "TRYON_SCALE_MAX_PERCENT" => self.scale_max_percent.to_string(),
            "TRYON_DEFAULT_SCALE_PERCENT" => self.default_scale_percent.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

/// The override for `key` if present and valid, otherwise its default.
fn effective_value(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> String {
    let default = get_default(key).unwrap_or_default();
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => match validate_setting(key, &raw) {
            Ok(()) => raw.trim().to_string(),
            Err(e) => {
                tracing::warn!("Ignoring invalid {key}={raw:?}: {e}; using default {default:?}");
                default.to_string()
            }
        },
        _ => default.to_string(),
    }
}

fn parse_u32(s: &str, default: u32) -> u32 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

fn parse_u8(s: &str, default: u8) -> u8 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}
