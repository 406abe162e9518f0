// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Application messages: pointer events, layout changes, user actions.

use crate::app::document::SourceImage;
use crate::app::export::OutputFormat;
use crate::domain::crop::{CropRect, DragMode, Rect};

#[derive(Debug)]
pub enum AppMessage {
    // Document.
    ImageLoaded(SourceImage),
    LoadFailed(String),

    // Layout (container-relative boxes of the preview).
    Layout {
        container: Rect,
        image: Rect,
    },

    // Pointer input, in container-local screen pixels.
    PointerDown {
        x: f32,
        y: f32,
    },
    CropDragStart {
        x: f32,
        y: f32,
        mode: DragMode,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    PointerUp,

    // Crop operations.
    SetRect(CropRect),
    ResetRect,
    ToggleGrid,

    // Export.
    SetOutputFormat(OutputFormat),
    Export,

    // Errors.
    ShowError(String),
    ClearError,
}
