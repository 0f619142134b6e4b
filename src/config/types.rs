//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Pointer handling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointerConfig {
    /// Process pointer events on startup
    #[serde(default = "default_focused")]
    pub focused: bool,

    /// Mask reported for touch presses (0 = touch clicks disabled, 1, 2 or 4)
    #[serde(default = "default_touch_button")]
    pub touch_button: u32,

    /// Attach touch listeners when grabbing
    #[serde(default)]
    pub touch_capable: bool,
}

fn default_focused() -> bool {
    true
}

fn default_touch_button() -> u32 {
    1
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            focused: default_focused(),
            touch_button: default_touch_button(),
            touch_capable: false,
        }
    }
}

/// Target surface geometry used by the replay tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Left edge in client coordinates
    #[serde(default)]
    pub left: f64,

    /// Top edge in client coordinates
    #[serde(default)]
    pub top: f64,

    /// Surface width
    pub width: f64,

    /// Surface height
    pub height: f64,

    /// Device pixel ratio
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f64,
}

fn default_pixel_ratio() -> f64 {
    1.0
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 1024.0,
            height: 768.0,
            pixel_ratio: default_pixel_ratio(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format ("pretty", "compact", "json")
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
