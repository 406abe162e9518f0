// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/model.rs
//
// Application state.

use crate::app::document::SourceImage;
use crate::app::export::ExportSettings;
use crate::config::AppConfig;
use crate::domain::crop::{CropEngine, NoCapture, PointerCapture};

pub struct AppModel<C: PointerCapture = NoCapture> {
    // Document.
    pub source: Option<SourceImage>,

    // Tools.
    pub engine: CropEngine<C>,
    pub show_grid: bool,

    // Export.
    pub export: ExportSettings,

    // UI state.
    pub error: Option<String>,
}

impl AppModel<NoCapture> {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_capture(config, NoCapture)
    }
}

impl<C: PointerCapture> AppModel<C> {
    pub fn with_capture(config: &AppConfig, capture: C) -> Self {
        let engine = CropEngine::with_capture(capture)
            .with_min_size(config.min_crop_width, config.min_crop_height)
            .with_max_output_pixels(config.max_output_pixels);

        Self {
            source: None,
            engine,
            show_grid: config.show_grid,
            export: config.export_settings(),
            error: None,
        }
    }

    pub fn set_error<S: Into<String>>(&mut self, msg: S) {
        self.error = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }
}
