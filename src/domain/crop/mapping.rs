// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/mapping.rs
//
// Screen <-> source pixel mapping for the rendered preview.

use super::geometry::{Point, Rect};
use super::region::CropRect;

/// Affine relation between the rendered preview and the source pixels.
///
/// Offsets are the rendered image's position inside its container. The scale
/// is uniform: `min(displayed / natural)` over both axes, so a letterboxed
/// preview keeps the overlay aligned with the actual pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMapping {
    pub offset_x: f32,
    pub offset_y: f32,
    pub display_w: f32,
    pub display_h: f32,
    pub scale: f32,
}

impl DisplayMapping {
    /// Build a mapping from the on-screen boxes of the container and the image.
    ///
    /// Returns `None` for degenerate layouts (zero-sized boxes, empty images).
    pub fn from_layout(container: Rect, image: Rect, natural: (u32, u32)) -> Option<Self> {
        let (nat_w, nat_h) = natural;
        if nat_w == 0 || nat_h == 0 || !image.has_area() {
            return None;
        }
        if !container.x.is_finite() || !container.y.is_finite() {
            return None;
        }

        let scale_x = image.width / nat_w as f32;
        let scale_y = image.height / nat_h as f32;
        let scale = scale_x.min(scale_y);
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }

        Some(Self {
            offset_x: image.x - container.x,
            offset_y: image.y - container.y,
            display_w: image.width,
            display_h: image.height,
            scale,
        })
    }

    /// Rendered box of an image fitted into `container` without upscaling,
    /// centered on both axes.
    pub fn contain(container: Rect, natural: (u32, u32)) -> Rect {
        let (nat_w, nat_h) = (natural.0 as f32, natural.1 as f32);
        if nat_w <= 0.0 || nat_h <= 0.0 || !container.has_area() {
            return Rect::new(container.x, container.y, 0.0, 0.0);
        }

        let fit = (container.width / nat_w).min(container.height / nat_h).min(1.0);
        let width = nat_w * fit;
        let height = nat_h * fit;
        Rect::new(
            container.x + (container.width - width) / 2.0,
            container.y + (container.height - height) / 2.0,
            width,
            height,
        )
    }

    /// Convert a screen (container-local) point into source pixels.
    pub fn screen_to_image(&self, point: Point) -> (f32, f32) {
        (
            (point.x - self.offset_x) / self.scale,
            (point.y - self.offset_y) / self.scale,
        )
    }

    /// Convert source pixels into a screen (container-local) point.
    pub fn image_to_screen(&self, x: f32, y: f32) -> Point {
        Point::new(self.offset_x + x * self.scale, self.offset_y + y * self.scale)
    }

    /// Screen-space box of a crop rectangle.
    pub fn rect_to_screen(&self, rect: &CropRect) -> Rect {
        let origin = self.image_to_screen(rect.x, rect.y);
        Rect::new(origin.x, origin.y, rect.w * self.scale, rect.h * self.scale)
    }

    /// Screen-space box of the rendered image.
    pub fn display_rect(&self) -> Rect {
        Rect::new(self.offset_x, self.offset_y, self.display_w, self.display_h)
    }

    /// Convert a screen-space delta into source pixels.
    pub fn delta_to_image(&self, dx: f32, dy: f32) -> (f32, f32) {
        (dx / self.scale, dy / self.scale)
    }
}
