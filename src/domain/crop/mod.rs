// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/mod.rs
//
// Crop-rectangle interaction engine: geometry, drag sessions, overlay, extraction.

mod engine;
mod extract;
mod geometry;
mod handle;
mod mapping;
mod overlay;
mod region;
mod session;

pub use engine::{CropEngine, move_rect, resize_rect};
pub use extract::extract_pixels;
pub use geometry::{Point, Rect};
pub use handle::{DragHandle, DragMode, Edges};
pub use mapping::DisplayMapping;
pub use overlay::{OverlayGeometry, handle_center, hit_test};
pub use region::{CropBounds, CropRect, CropRegion};
pub use session::{CountingCapture, DragAnchor, DragSession, NoCapture, PointerCapture};
