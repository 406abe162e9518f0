// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/region.rs
//
// Crop rectangle (source pixel space) and its integer extraction region.

/// Limits a crop rectangle must respect for a given source image.
///
/// The minimum on each axis never exceeds the image dimension, so an image
/// smaller than the configured minimum can still hold a valid rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBounds {
    pub width: f32,
    pub height: f32,
    pub min_width: f32,
    pub min_height: f32,
}

impl CropBounds {
    pub fn new(img_width: u32, img_height: u32, min_width: f32, min_height: f32) -> Self {
        let width = img_width as f32;
        let height = img_height as f32;
        Self {
            width,
            height,
            min_width: finite_or(min_width, 1.0).max(0.0).min(width),
            min_height: finite_or(min_height, 1.0).max(0.0).min(height),
        }
    }
}

/// The crop rectangle in source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl CropRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Default rectangle for a freshly loaded image: half its size, centered.
    pub fn centered(bounds: &CropBounds) -> Self {
        let w = (bounds.width / 2.0).floor();
        let h = (bounds.height / 2.0).floor();
        Self::new(
            ((bounds.width - w) / 2.0).floor(),
            ((bounds.height - h) / 2.0).floor(),
            w,
            h,
        )
        .clamp_to(bounds)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Force the rectangle into `bounds`: size first, then position.
    pub fn clamp_to(self, bounds: &CropBounds) -> Self {
        let w = finite_or(self.w, bounds.min_width)
            .max(bounds.min_width)
            .min(bounds.width);
        let h = finite_or(self.h, bounds.min_height)
            .max(bounds.min_height)
            .min(bounds.height);
        let x = finite_or(self.x, 0.0).min(bounds.width - w).max(0.0);
        let y = finite_or(self.y, 0.0).min(bounds.height - h).max(0.0);
        Self::new(
            fit_origin(x, w, bounds.width),
            fit_origin(y, h, bounds.height),
            w,
            h,
        )
    }

    /// Check every containment and minimum-size invariant.
    pub fn satisfies(&self, bounds: &CropBounds) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= bounds.width
            && self.bottom() <= bounds.height
            && self.w >= bounds.min_width
            && self.h >= bounds.min_height
    }

    /// Round to whole pixels inside an image of `img_width` x `img_height`.
    ///
    /// Returns `None` when nothing of the rectangle survives rounding.
    pub fn to_region(&self, img_width: u32, img_height: u32) -> Option<CropRegion> {
        let round = |v: f32| -> u32 {
            if v.is_finite() && v > 0.0 {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                {
                    v.round() as u32
                }
            } else {
                0
            }
        };

        let x = round(self.x);
        let y = round(self.y);
        if x >= img_width || y >= img_height {
            return None;
        }

        let region = CropRegion::new(
            x,
            y,
            round(self.w).min(img_width - x),
            round(self.h).min(img_height - y),
        );
        region.is_valid().then_some(region)
    }
}

/// Crop region in whole pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.x, self.y, self.width, self.height)
    }

    /// Check if region has valid dimensions.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Number of pixels in the region, `None` on overflow.
    pub fn pixel_count(&self) -> Option<u64> {
        u64::from(self.width).checked_mul(u64::from(self.height))
    }

    /// Check the region lies entirely inside an image of the given size.
    pub fn fits_within(&self, img_width: u32, img_height: u32) -> bool {
        self.x
            .checked_add(self.width)
            .is_some_and(|right| right <= img_width)
            && self
                .y
                .checked_add(self.height)
                .is_some_and(|bottom| bottom <= img_height)
    }
}

/// Cap `origin` so that `origin + size` cannot round past `limit`.
pub(crate) fn fit_origin(origin: f32, size: f32, limit: f32) -> f32 {
    let step = ulp(limit);
    let mut max_origin = (limit - size).max(0.0);
    while max_origin > 0.0 && max_origin + size > limit {
        max_origin = (max_origin - step).max(0.0);
    }
    origin.min(max_origin)
}

/// Cap `size` (never below `min`) so that `origin + size` fits `limit`.
pub(crate) fn fit_size(origin: f32, size: f32, min: f32, limit: f32) -> f32 {
    let step = ulp(limit);
    let mut max_size = limit - origin;
    while max_size > min && origin + max_size > limit {
        max_size = (max_size - step).max(min);
    }
    size.min(max_size.max(min))
}

/// Gap between `value` and the next larger float.
fn ulp(value: f32) -> f32 {
    let value = value.abs();
    f32::from_bits(value.to_bits() + 1) - value
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}
