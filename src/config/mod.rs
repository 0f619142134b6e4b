//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - CLI arguments
//!
//! Protocol constants (wheel threshold, flush delay, line height, double-tap
//! window and radius) are fixed and not configurable.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::input::{ButtonMask, MouseOptions, Rect, SharedSurface};

pub mod types;

pub use types::{LoggingConfig, PointerConfig, SurfaceConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Pointer configuration
    #[serde(default)]
    pub pointer: PointerConfig,
    /// Target surface configuration
    #[serde(default)]
    pub surface: SurfaceConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Result<Self> {
        let config = Config::default();
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        ButtonMask::touch_button(self.pointer.touch_button).context("Invalid pointer.touch_button")?;

        self.surface_rect()
            .validate()
            .context("Invalid surface geometry")?;

        if !(self.surface.pixel_ratio.is_finite() && self.surface.pixel_ratio > 0.0) {
            anyhow::bail!("Invalid pixel ratio: {}", self.surface.pixel_ratio);
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" | "json" => {}
            _ => anyhow::bail!("Invalid log format: {}", self.logging.format),
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(mut self, focused: Option<bool>, touch_button: Option<u32>) -> Self {
        if let Some(focused) = focused {
            self.pointer.focused = focused;
        }
        if let Some(touch_button) = touch_button {
            self.pointer.touch_button = touch_button;
        }

        self
    }

    /// Target surface rectangle
    pub fn surface_rect(&self) -> Rect {
        Rect::new(
            self.surface.left,
            self.surface.top,
            self.surface.width,
            self.surface.height,
        )
    }

    /// Build a shared target surface
    pub fn to_surface(&self) -> Result<SharedSurface> {
        SharedSurface::new(self.surface_rect(), self.surface.pixel_ratio)
            .context("Failed to create target surface")
    }

    /// Convert pointer configuration to coordinator options
    pub fn to_mouse_options(&self) -> Result<MouseOptions> {
        Ok(MouseOptions {
            focused: self.pointer.focused,
            touch_button: ButtonMask::touch_button(self.pointer.touch_button)
                .context("Invalid pointer.touch_button")?,
            touch_capable: self.pointer.touch_capable,
        })
    }
}
