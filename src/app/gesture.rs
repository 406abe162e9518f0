// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/gesture.rs
//
// Scripted drags: `<target>:<dx>,<dy>` in screen pixels.

use std::fmt;
use std::str::FromStr;

use crate::app::message::AppMessage;
use crate::app::model::AppModel;
use crate::app::update::update;
use crate::domain::crop::{CropRect, DragMode, PointerCapture, handle_center};
use crate::domain::CropError;

/// One complete press-drag-release on the crop overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub mode: DragMode,
    pub dx: f32,
    pub dy: f32,
}

impl Gesture {
    /// Drive the gesture through the message loop, pressing on the grip the
    /// mode names (the box center for `move`). Returns the resulting
    /// rectangle, or `None` if no layout is available yet.
    pub fn replay<C: PointerCapture>(&self, model: &mut AppModel<C>) -> Option<CropRect> {
        let (rect, mapping) = (model.engine.rect()?, *model.engine.mapping()?);
        let selection = mapping.rect_to_screen(&rect);
        let start = match self.mode {
            DragMode::Move => selection.center(),
            DragMode::Resize(handle) => handle_center(selection, handle),
        };

        update(
            model,
            AppMessage::CropDragStart {
                x: start.x,
                y: start.y,
                mode: self.mode,
            },
        );
        update(
            model,
            AppMessage::PointerMove {
                x: start.x + self.dx,
                y: start.y + self.dy,
            },
        );
        update(model, AppMessage::PointerUp);

        let result = model.engine.rect();
        log::debug!("Gesture {self} -> {result:?}");
        result
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match self.mode {
            DragMode::Move => "move".to_string(),
            DragMode::Resize(handle) => handle.to_string(),
        };
        write!(f, "{target}:{},{}", self.dx, self.dy)
    }
}

impl FromStr for Gesture {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CropError::UnknownHandle(s.to_string());

        let (target, delta) = s.split_once(':').ok_or_else(invalid)?;
        let (dx, dy) = delta.split_once(',').ok_or_else(invalid)?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(invalid)
        };

        Ok(Self {
            mode: target.trim().parse()?,
            dx: parse(dx)?,
            dy: parse(dy)?,
        })
    }
}
