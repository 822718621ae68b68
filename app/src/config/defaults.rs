//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    (
        "TRYON_OUTPUT_FILE",
        "walmart_tryon_result.jpg",
        "File name the try-on result is exported to",
    ),
    ("TRYON_JPEG_QUALITY", "90", "JPEG quality of the exported result (1-100)"),
    ("TRYON_SCALE_MIN_PERCENT", "10", "Smallest allowed overlay scale in percent"),
    ("TRYON_SCALE_MAX_PERCENT", "300", "Largest allowed overlay scale in percent"),
    (
        "TRYON_DEFAULT_SCALE_PERCENT",
        "100",
        "Overlay scale in percent when none is given",
    ),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}
