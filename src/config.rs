// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Global configuration for the application, stored as TOML.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::app::export::{ExportSettings, OutputFormat};
use crate::constant::{
    CONFIG_DIR, CONFIG_FILE, DEFAULT_JPEG_QUALITY, DEFAULT_MAX_OUTPUT_PIXELS, DEFAULT_VIEWPORT,
    MIN_CROP_HEIGHT, MIN_CROP_WIDTH,
};

/// Global configuration for the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory exports are written to when no output path is given.
    pub default_output_dir: Option<PathBuf>,
    /// Minimum crop width in source pixels.
    pub min_crop_width: f32,
    /// Minimum crop height in source pixels.
    pub min_crop_height: f32,
    /// Encoding used when neither a flag nor the output extension picks one.
    pub output_format: OutputFormat,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// Whether the rule-of-thirds grid is drawn.
    pub show_grid: bool,
    /// Preview container width in screen pixels.
    pub viewport_width: f32,
    /// Preview container height in screen pixels.
    pub viewport_height: f32,
    /// Largest crop (in pixels) we agree to extract.
    pub max_output_pixels: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_output_dir: dirs::download_dir().or_else(dirs::home_dir),
            min_crop_width: MIN_CROP_WIDTH,
            min_crop_height: MIN_CROP_HEIGHT,
            output_format: OutputFormat::Png,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            show_grid: true,
            viewport_width: DEFAULT_VIEWPORT.0,
            viewport_height: DEFAULT_VIEWPORT.1,
            max_output_pixels: DEFAULT_MAX_OUTPUT_PIXELS,
        }
    }
}

impl AppConfig {
    /// Platform location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from an explicit path (must exist) or the default location
    /// (defaults when absent).
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::read(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::read(&path),
            _ => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw)?;
        Ok(config.sanitized())
    }

    /// Pull out-of-range values back to something usable.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.min_crop_width.is_finite() && self.min_crop_width >= 1.0) {
            log::warn!("min_crop_width {} out of range, using default", self.min_crop_width);
            self.min_crop_width = defaults.min_crop_width;
        }
        if !(self.min_crop_height.is_finite() && self.min_crop_height >= 1.0) {
            log::warn!("min_crop_height {} out of range, using default", self.min_crop_height);
            self.min_crop_height = defaults.min_crop_height;
        }
        if !(self.viewport_width.is_finite() && self.viewport_width > 0.0) {
            self.viewport_width = defaults.viewport_width;
        }
        if !(self.viewport_height.is_finite() && self.viewport_height > 0.0) {
            self.viewport_height = defaults.viewport_height;
        }
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        if self.max_output_pixels == 0 {
            self.max_output_pixels = defaults.max_output_pixels;
        }
        self
    }

    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            format: self.output_format,
            jpeg_quality: self.jpeg_quality,
        }
    }
}
