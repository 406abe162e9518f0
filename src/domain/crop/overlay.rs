// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/overlay.rs
//
// Overlay geometry (shade, border, handles, grid) and handle hit-testing.

use super::geometry::{Point, Rect};
use super::handle::{DragHandle, DragMode};
use super::mapping::DisplayMapping;
use super::region::CropRect;
use crate::constant::{BORDER_WIDTH, GRID_MIN_SIZE, GRID_WIDTH, HANDLE_HIT_SIZE, HANDLE_SIZE};

/// Everything a renderer needs to draw the crop overlay, in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayGeometry {
    /// Selection box.
    pub selection: Rect,
    /// Dimmed quads covering the preview outside the selection.
    pub shade: Vec<Rect>,
    /// Top, bottom, left, right border strips.
    pub border: [Rect; 4],
    /// Handle squares.
    pub handles: Vec<(DragHandle, Rect)>,
    /// Rule-of-thirds lines (empty when disabled or too small).
    pub grid: Vec<Rect>,
}

impl OverlayGeometry {
    pub fn build(mapping: &DisplayMapping, rect: &CropRect, show_grid: bool) -> Self {
        let selection = mapping.rect_to_screen(rect);
        let display = mapping.display_rect();

        Self {
            selection,
            shade: shade_quads(display, selection),
            border: border_strips(selection),
            handles: DragHandle::ALL
                .iter()
                .map(|&handle| {
                    (
                        handle,
                        Rect::centered_square(handle_center(selection, handle), HANDLE_SIZE),
                    )
                })
                .collect(),
            grid: if show_grid {
                grid_lines(selection)
            } else {
                Vec::new()
            },
        }
    }
}

/// Screen position of a handle on a selection box.
pub fn handle_center(selection: Rect, handle: DragHandle) -> Point {
    let (fx, fy) = handle.anchor_fraction();
    Point::new(
        selection.x + selection.width * fx,
        selection.y + selection.height * fy,
    )
}

/// Resolve a pointer-down position into the drag it starts.
///
/// Corner handles take priority over edge handles, handles over the box body.
pub fn hit_test(mapping: &DisplayMapping, rect: &CropRect, point: Point) -> Option<DragMode> {
    if !point.is_finite() {
        return None;
    }
    let selection = mapping.rect_to_screen(rect);

    DragHandle::ALL
        .iter()
        .find(|&&handle| {
            Rect::centered_square(handle_center(selection, handle), HANDLE_HIT_SIZE).contains(point)
        })
        .map(|&handle| DragMode::Resize(handle))
        .or_else(|| selection.contains(point).then_some(DragMode::Move))
}

fn shade_quads(display: Rect, selection: Rect) -> Vec<Rect> {
    let mut quads = Vec::with_capacity(4);

    // Top
    if selection.y > display.y {
        quads.push(Rect::new(
            display.x,
            display.y,
            display.width,
            selection.y - display.y,
        ));
    }

    // Bottom
    if selection.bottom() < display.bottom() {
        quads.push(Rect::new(
            display.x,
            selection.bottom(),
            display.width,
            display.bottom() - selection.bottom(),
        ));
    }

    // Left
    if selection.x > display.x {
        quads.push(Rect::new(
            display.x,
            selection.y,
            selection.x - display.x,
            selection.height,
        ));
    }

    // Right
    if selection.right() < display.right() {
        quads.push(Rect::new(
            selection.right(),
            selection.y,
            display.right() - selection.right(),
            selection.height,
        ));
    }

    quads
}

fn border_strips(sel: Rect) -> [Rect; 4] {
    [
        Rect::new(sel.x, sel.y, sel.width, BORDER_WIDTH),
        Rect::new(sel.x, sel.bottom() - BORDER_WIDTH, sel.width, BORDER_WIDTH),
        Rect::new(sel.x, sel.y, BORDER_WIDTH, sel.height),
        Rect::new(sel.right() - BORDER_WIDTH, sel.y, BORDER_WIDTH, sel.height),
    ]
}

fn grid_lines(sel: Rect) -> Vec<Rect> {
    if sel.width <= GRID_MIN_SIZE || sel.height <= GRID_MIN_SIZE {
        return Vec::new();
    }

    let third_w = sel.width / 3.0;
    let third_h = sel.height / 3.0;
    let mut lines = Vec::with_capacity(4);

    // 2 vertical
    for i in 1..3 {
        lines.push(Rect::new(
            sel.x + third_w * i as f32,
            sel.y,
            GRID_WIDTH,
            sel.height,
        ));
    }

    // 2 horizontal
    for i in 1..3 {
        lines.push(Rect::new(
            sel.x,
            sel.y + third_h * i as f32,
            sel.width,
            GRID_WIDTH,
        ));
    }

    lines
}
