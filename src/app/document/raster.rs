// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/document/raster.rs

use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, GenericImageView, ImageReader, imageops};

/// Raster image document (PNG, JPEG, WebP, ...).
pub struct RasterDocument {
    /// The decoded image, already in display orientation.
    document: DynamicImage,
    /// EXIF orientation tag (1-8) that was applied on open.
    orientation: u32,
}

impl RasterDocument {
    /// Load a raster document from disk, honoring its EXIF orientation.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let document = ImageReader::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("Failed to read {}", path.display()))?
            .decode()
            .with_context(|| format!("Failed to decode {}", path.display()))?;

        let orientation = read_orientation(path);
        let document = apply_orientation(document, orientation);

        Ok(Self {
            document,
            orientation,
        })
    }

    /// Returns the pixel dimensions (width, height) after orientation.
    pub fn dimensions(&self) -> (u32, u32) {
        self.document.dimensions()
    }

    pub fn orientation(&self) -> u32 {
        self.orientation
    }

    pub fn into_image(self) -> DynamicImage {
        self.document
    }
}

/// Rotate/flip an image according to an EXIF orientation value.
///
/// Unknown values are treated as 1 (no transform).
pub fn apply_orientation(image: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => DynamicImage::ImageRgba8(imageops::flip_horizontal(&image)),
        3 => DynamicImage::ImageRgba8(imageops::rotate180(&image)),
        4 => DynamicImage::ImageRgba8(imageops::flip_vertical(&image)),
        5 => DynamicImage::ImageRgba8(imageops::flip_horizontal(&imageops::rotate90(&image))),
        6 => DynamicImage::ImageRgba8(imageops::rotate90(&image)),
        7 => DynamicImage::ImageRgba8(imageops::flip_horizontal(&imageops::rotate270(&image))),
        8 => DynamicImage::ImageRgba8(imageops::rotate270(&image)),
        _ => image,
    }
}

#[cfg(feature = "exif")]
fn read_orientation(path: &Path) -> u32 {
    let read = || -> Result<u32, exif::Error> {
        let file = std::fs::File::open(path)?;
        let mut reader = std::io::BufReader::new(file);
        let exif = exif::Reader::new().read_from_container(&mut reader)?;
        Ok(exif
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .unwrap_or(1))
    };

    match read() {
        Ok(orientation) => orientation,
        Err(e) => {
            log::debug!("No EXIF orientation for {}: {e}", path.display());
            1
        }
    }
}

#[cfg(not(feature = "exif"))]
fn read_orientation(_path: &Path) -> u32 {
    1
}
