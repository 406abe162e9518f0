// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/session.rs
//
// Drag session state and pointer capture.

use super::geometry::Point;
use super::handle::DragMode;
use super::region::CropRect;

/// Pointer position and rectangle the next delta is measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub pointer: Point,
    pub rect: CropRect,
}

/// An in-progress move or resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    mode: DragMode,
    anchor: DragAnchor,
}

impl DragSession {
    pub fn new(mode: DragMode, pointer: Point, rect: CropRect) -> Self {
        Self {
            mode,
            anchor: DragAnchor { pointer, rect },
        }
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn anchor(&self) -> &DragAnchor {
        &self.anchor
    }

    /// Measure the next delta from `pointer` and `rect`.
    pub fn reanchor(&mut self, pointer: Point, rect: CropRect) {
        self.anchor = DragAnchor { pointer, rect };
    }
}

/// Global pointer-move / pointer-up subscription held for a drag's lifetime.
///
/// `attach` is called exactly once when a session opens and `detach` exactly
/// once when it closes, so a drag keeps tracking after the pointer leaves the
/// crop box and no listener outlives its session.
pub trait PointerCapture {
    fn attach(&mut self);
    fn detach(&mut self);
}

/// Capture for hosts that already deliver every pointer event to the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn attach(&mut self) {}
    fn detach(&mut self) {}
}

/// Capture that counts subscriptions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingCapture {
    pub attached: u32,
    pub detached: u32,
}

impl CountingCapture {
    /// Listeners currently attached.
    pub fn active(&self) -> u32 {
        self.attached - self.detached
    }
}

impl PointerCapture for CountingCapture {
    fn attach(&mut self) {
        self.attached += 1;
    }

    fn detach(&mut self) {
        self.detached += 1;
    }
}
