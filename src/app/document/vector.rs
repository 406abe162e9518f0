// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/document/vector.rs
//
// Vector documents (SVG), rasterized once at native size for cropping.

use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, RgbaImage};
use resvg::tiny_skia::{self, Pixmap};
use resvg::usvg::{Options, Tree};

use crate::constant::MIN_PIXMAP_SIZE;

/// A vector document rendered to pixels.
pub struct VectorDocument {
    /// Native width of the SVG (from viewBox or width attribute).
    native_width: u32,
    /// Native height of the SVG (from viewBox or height attribute).
    native_height: u32,
    /// Rasterized image at native scale.
    rendered: DynamicImage,
}

impl VectorDocument {
    /// Load a vector document from disk (plain or gzip-compressed SVG).
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let raw_data =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_data(&raw_data)
    }

    /// Parse and rasterize SVG bytes.
    pub fn from_data(data: &[u8]) -> anyhow::Result<Self> {
        let options = Options::default();
        let document = Tree::from_data(data, &options).context("Failed to parse SVG")?;

        let size = document.size();
        let native_width = (size.width().ceil() as u32).max(MIN_PIXMAP_SIZE);
        let native_height = (size.height().ceil() as u32).max(MIN_PIXMAP_SIZE);

        let rendered = render_document(&document, native_width, native_height)?;

        Ok(Self {
            native_width,
            native_height,
            rendered,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.native_width, self.native_height)
    }

    pub fn into_image(self) -> DynamicImage {
        self.rendered
    }
}

fn render_document(document: &Tree, width: u32, height: u32) -> anyhow::Result<DynamicImage> {
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to create {width}x{height} pixmap"))?;

    resvg::render(document, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    pixmap_to_dynamic_image(&pixmap)
}

/// Convert a tiny_skia Pixmap to a DynamicImage.
fn pixmap_to_dynamic_image(pixmap: &Pixmap) -> anyhow::Result<DynamicImage> {
    let width = pixmap.width();
    let height = pixmap.height();

    // tiny_skia uses premultiplied alpha, the image crate expects straight alpha.
    let mut pixels = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        pixels.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    let rgba_image = RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| anyhow::anyhow!("Pixmap data does not match {width}x{height}"))?;

    Ok(DynamicImage::ImageRgba8(rgba_image))
}
