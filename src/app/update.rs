// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/update.rs
//
// Message dispatch: the only place engine state is mutated.

use crate::app::export::{self, ExportedImage};
use crate::app::message::AppMessage;
use crate::app::model::AppModel;
use crate::domain::crop::{Point, PointerCapture};
use crate::domain::CropError;

/// What the caller should do after a message was handled.
#[derive(Debug)]
pub enum UpdateResult {
    None,
    /// Geometry changed; redraw the overlay.
    Redraw,
    /// An export finished; hand the bytes to the save collaborator.
    Exported(ExportedImage),
}

pub fn update<C: PointerCapture>(model: &mut AppModel<C>, message: AppMessage) -> UpdateResult {
    match message {
        AppMessage::ImageLoaded(source) => {
            let (width, height) = source.dimensions();
            // Invalidates any drag on the previous image.
            model.engine.reset_for_image(width, height);
            model.source = Some(source);
            model.clear_error();
            UpdateResult::Redraw
        }

        AppMessage::LoadFailed(msg) => {
            log::error!("Failed to load image: {msg}");
            model.set_error(msg);
            UpdateResult::Redraw
        }

        AppMessage::Layout { container, image } => {
            if model.engine.recompute_display_mapping(container, image) {
                UpdateResult::Redraw
            } else {
                UpdateResult::None
            }
        }

        AppMessage::PointerDown { x, y } => {
            let point = Point::new(x, y);
            let Some(mode) = model.engine.hit_test(point) else {
                return UpdateResult::None;
            };
            if model.engine.begin_drag(point, mode) {
                UpdateResult::Redraw
            } else {
                UpdateResult::None
            }
        }

        AppMessage::CropDragStart { x, y, mode } => {
            if model.engine.begin_drag(Point::new(x, y), mode) {
                UpdateResult::Redraw
            } else {
                UpdateResult::None
            }
        }

        AppMessage::PointerMove { x, y } => match model.engine.update_drag(Point::new(x, y)) {
            Some(_) => UpdateResult::Redraw,
            None => UpdateResult::None,
        },

        AppMessage::PointerUp => {
            if model.engine.is_dragging() {
                model.engine.end_drag();
                UpdateResult::Redraw
            } else {
                UpdateResult::None
            }
        }

        AppMessage::SetRect(rect) => match model.engine.set_rect(rect) {
            Some(_) => UpdateResult::Redraw,
            None => UpdateResult::None,
        },

        AppMessage::ResetRect => match model.engine.reset_rect() {
            Some(_) => UpdateResult::Redraw,
            None => UpdateResult::None,
        },

        AppMessage::ToggleGrid => {
            model.show_grid = !model.show_grid;
            UpdateResult::Redraw
        }

        AppMessage::SetOutputFormat(format) => {
            model.export.format = format;
            UpdateResult::None
        }

        AppMessage::Export => match export_crop(model) {
            Ok(exported) => UpdateResult::Exported(exported),
            Err(e) => {
                log::error!("Export failed: {e}");
                model.set_error(e.to_string());
                UpdateResult::Redraw
            }
        },

        AppMessage::ShowError(msg) => {
            model.set_error(msg);
            UpdateResult::Redraw
        }

        AppMessage::ClearError => {
            model.clear_error();
            UpdateResult::Redraw
        }
    }
}

fn export_crop<C: PointerCapture>(model: &AppModel<C>) -> Result<ExportedImage, CropError> {
    let source = model.source.as_ref().ok_or(CropError::NoImage)?;
    let cropped = model.engine.extract_pixels(source.pixels())?;
    export::encode(&cropped, model.export)
}
