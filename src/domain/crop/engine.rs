// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/engine.rs
//
// Crop-rectangle interaction engine: drag/resize math and pixel extraction.

use image::{DynamicImage, GenericImageView};

use super::extract::extract_pixels;
use super::geometry::{Point, Rect};
use super::handle::{DragMode, Edges};
use super::mapping::DisplayMapping;
use super::overlay::{self, OverlayGeometry};
use super::region::{CropBounds, CropRect, CropRegion, fit_origin, fit_size};
use super::session::{DragSession, NoCapture, PointerCapture};
use crate::constant::{DEFAULT_MAX_OUTPUT_PIXELS, MIN_CROP_HEIGHT, MIN_CROP_WIDTH};
use crate::domain::error::{CropError, CropResult};

/// Owns the crop rectangle of one source image and applies pointer drags to it.
///
/// Every public mutation leaves the rectangle inside the image and at least
/// the minimum size. Calls whose preconditions are missing (no image, no
/// layout, no open drag) are no-ops.
#[derive(Debug)]
pub struct CropEngine<C: PointerCapture = NoCapture> {
    min_size: (f32, f32),
    max_output_pixels: u64,
    natural: Option<(u32, u32)>,
    bounds: Option<CropBounds>,
    rect: Option<CropRect>,
    mapping: Option<DisplayMapping>,
    session: Option<DragSession>,
    capture: C,
}

impl Default for CropEngine<NoCapture> {
    fn default() -> Self {
        Self::new()
    }
}

impl CropEngine<NoCapture> {
    pub fn new() -> Self {
        Self::with_capture(NoCapture)
    }
}

impl<C: PointerCapture> CropEngine<C> {
    pub fn with_capture(capture: C) -> Self {
        Self {
            min_size: (MIN_CROP_WIDTH, MIN_CROP_HEIGHT),
            max_output_pixels: DEFAULT_MAX_OUTPUT_PIXELS,
            natural: None,
            bounds: None,
            rect: None,
            mapping: None,
            session: None,
            capture,
        }
    }

    /// Minimum crop size in source pixels, applied from the next image load.
    #[must_use]
    pub fn with_min_size(mut self, width: f32, height: f32) -> Self {
        self.min_size = (width, height);
        self
    }

    /// Largest buffer `extract_pixels` may allocate.
    #[must_use]
    pub fn with_max_output_pixels(mut self, max_pixels: u64) -> Self {
        self.max_output_pixels = max_pixels;
        self
    }

    // ---------------------------------------------------------------------
    // Image lifecycle
    // ---------------------------------------------------------------------

    /// A new source image was published: drop any drag, reset the rectangle
    /// to the centered default and wait for the next layout pass.
    pub fn reset_for_image(&mut self, width: u32, height: u32) {
        self.discard_session();

        let bounds = CropBounds::new(width, height, self.min_size.0, self.min_size.1);
        let rect = CropRect::centered(&bounds);
        log::debug!("Crop reset for {width}x{height} image: {rect:?}");

        self.natural = Some((width, height));
        self.bounds = Some(bounds);
        self.rect = Some(rect);
        self.mapping = None;
    }

    /// Forget the current image entirely.
    pub fn clear(&mut self) {
        self.discard_session();
        self.natural = None;
        self.bounds = None;
        self.rect = None;
        self.mapping = None;
    }

    pub fn has_image(&self) -> bool {
        self.bounds.is_some()
    }

    pub fn bounds(&self) -> Option<&CropBounds> {
        self.bounds.as_ref()
    }

    pub fn rect(&self) -> Option<CropRect> {
        self.rect
    }

    /// Replace the rectangle while idle. The value is clamped into bounds.
    pub fn set_rect(&mut self, rect: CropRect) -> Option<CropRect> {
        if self.session.is_some() {
            log::debug!("Ignoring rect override during a drag");
            return self.rect;
        }
        let bounds = self.bounds?;
        let clamped = rect.clamp_to(&bounds);
        self.rect = Some(clamped);
        Some(clamped)
    }

    /// Restore the centered default rectangle.
    pub fn reset_rect(&mut self) -> Option<CropRect> {
        let bounds = self.bounds?;
        self.discard_session();
        self.rect = Some(CropRect::centered(&bounds));
        self.rect
    }

    // ---------------------------------------------------------------------
    // Layout
    // ---------------------------------------------------------------------

    pub fn mapping(&self) -> Option<&DisplayMapping> {
        self.mapping.as_ref()
    }

    /// Recompute the display mapping from the rendered image box and its
    /// container. Degenerate layouts keep the previous mapping.
    pub fn recompute_display_mapping(&mut self, container: Rect, image: Rect) -> bool {
        let Some(natural) = self.natural else {
            return false;
        };

        match DisplayMapping::from_layout(container, image, natural) {
            Some(mapping) => {
                log::debug!("Display mapping: {mapping:?}");
                self.mapping = Some(mapping);
                true
            }
            None => {
                log::warn!("Ignoring degenerate layout: container {container:?}, image {image:?}");
                false
            }
        }
    }

    // ---------------------------------------------------------------------
    // Drag state machine
    // ---------------------------------------------------------------------

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn drag_mode(&self) -> Option<DragMode> {
        self.session.as_ref().map(DragSession::mode)
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    /// Idle -> Dragging. Returns whether a session was opened.
    pub fn begin_drag(&mut self, pointer: Point, mode: DragMode) -> bool {
        if self.session.is_some() {
            log::debug!("Drag already in progress, ignoring begin ({mode})");
            return false;
        }
        let (Some(rect), Some(_)) = (self.rect, self.mapping) else {
            log::debug!("No image or layout yet, ignoring begin ({mode})");
            return false;
        };
        if !pointer.is_finite() {
            return false;
        }

        self.session = Some(DragSession::new(mode, pointer, rect));
        self.capture.attach();
        log::debug!("Drag started: {mode} at {pointer:?}");
        true
    }

    /// Dragging -> Dragging. Returns the new rectangle, if a drag is open.
    pub fn update_drag(&mut self, pointer: Point) -> Option<CropRect> {
        let (Some(session), Some(mapping), Some(bounds)) =
            (self.session.as_mut(), self.mapping, self.bounds)
        else {
            return None;
        };
        if !pointer.is_finite() {
            return self.rect;
        }

        let anchor = *session.anchor();
        let (dx, dy) = mapping.delta_to_image(
            pointer.x - anchor.pointer.x,
            pointer.y - anchor.pointer.y,
        );

        let candidate = match session.mode() {
            DragMode::Move => move_rect(&anchor.rect, dx, dy, &bounds),
            DragMode::Resize(handle) => resize_rect(&anchor.rect, handle.edges(), dx, dy, &bounds),
        };

        // Measure the next event from this result so clamped drags do not recoil.
        session.reanchor(pointer, candidate);
        self.rect = Some(candidate);
        Some(candidate)
    }

    /// Dragging -> Idle. Idempotent.
    pub fn end_drag(&mut self) {
        if let Some(session) = self.session.take() {
            self.capture.detach();
            log::debug!("Drag ended: {} -> {:?}", session.mode(), self.rect);
        }
    }

    fn discard_session(&mut self) {
        if self.session.take().is_some() {
            self.capture.detach();
            log::debug!("Open drag discarded");
        }
    }

    // ---------------------------------------------------------------------
    // Rendering helpers
    // ---------------------------------------------------------------------

    /// Which drag a pointer-down at `point` (container-local) should start.
    pub fn hit_test(&self, point: Point) -> Option<DragMode> {
        let (Some(rect), Some(mapping)) = (self.rect.as_ref(), self.mapping.as_ref()) else {
            return None;
        };
        overlay::hit_test(mapping, rect, point)
    }

    /// Overlay geometry for the current frame.
    pub fn overlay(&self, show_grid: bool) -> Option<OverlayGeometry> {
        let (Some(rect), Some(mapping)) = (self.rect.as_ref(), self.mapping.as_ref()) else {
            return None;
        };
        Some(OverlayGeometry::build(mapping, rect, show_grid))
    }

    // ---------------------------------------------------------------------
    // Extraction
    // ---------------------------------------------------------------------

    /// Whole-pixel region that `extract_pixels` will copy.
    pub fn region(&self) -> Option<CropRegion> {
        let (rect, (w, h)) = (self.rect?, self.natural?);
        rect.to_region(w, h)
    }

    /// Copy the crop rectangle out of `source` at 1:1 pixel fidelity.
    pub fn extract_pixels(&self, source: &DynamicImage) -> CropResult<DynamicImage> {
        let (rect, natural) = self.rect.zip(self.natural).ok_or(CropError::NoImage)?;
        if source.dimensions() != natural {
            return Err(CropError::extraction(format!(
                "source is {}x{} but the crop was set up for {}x{}",
                source.width(),
                source.height(),
                natural.0,
                natural.1
            )));
        }
        let region = rect
            .to_region(source.width(), source.height())
            .ok_or_else(|| {
                CropError::extraction(format!("crop rectangle {rect:?} is empty after rounding"))
            })?;
        extract_pixels(source, region, self.max_output_pixels)
    }
}

/// Translate the anchor rectangle, keeping it inside the image.
pub fn move_rect(anchor: &CropRect, dx: f32, dy: f32, bounds: &CropBounds) -> CropRect {
    let x = (anchor.x + dx).min(bounds.width - anchor.w).max(0.0);
    let y = (anchor.y + dy).min(bounds.height - anchor.h).max(0.0);
    CropRect::new(
        fit_origin(x, anchor.w, bounds.width),
        fit_origin(y, anchor.h, bounds.height),
        anchor.w,
        anchor.h,
    )
}

/// Resize the anchor rectangle by the edges a handle drags. Each edge is
/// resolved independently against the same anchor.
pub fn resize_rect(
    anchor: &CropRect,
    edges: Edges,
    dx: f32,
    dy: f32,
    bounds: &CropBounds,
) -> CropRect {
    let mut rect = *anchor;

    if edges.east {
        rect.w = grow_trailing(anchor.x, anchor.w, dx, bounds.min_width, bounds.width);
    }
    if edges.south {
        rect.h = grow_trailing(anchor.y, anchor.h, dy, bounds.min_height, bounds.height);
    }
    if edges.west {
        (rect.x, rect.w) =
            grow_leading(anchor.x, anchor.w, dx, bounds.min_width, bounds.width);
    }
    if edges.north {
        (rect.y, rect.h) =
            grow_leading(anchor.y, anchor.h, dy, bounds.min_height, bounds.height);
    }

    rect
}

/// East/south edge: origin fixed, size clamped to `[min, limit - origin]`.
fn grow_trailing(origin: f32, size: f32, delta: f32, min: f32, limit: f32) -> f32 {
    let size = (size + delta).max(min).min(limit - origin);
    fit_size(origin, size, min, limit)
}

/// West/north edge: the opposite edge stays fixed.
fn grow_leading(origin: f32, size: f32, delta: f32, min: f32, limit: f32) -> (f32, f32) {
    let far = origin + size;
    let mut new_origin = origin + delta;
    let mut new_size = size - delta;

    if new_size < min {
        new_origin = origin + (size - min);
        new_size = min;
    }
    if new_origin < 0.0 {
        // Clipped at the image edge: give back the overflow.
        new_origin = 0.0;
        new_size = far;
    }

    let new_size = new_size.min(limit);
    (fit_origin(new_origin, new_size, limit), new_size)
}
