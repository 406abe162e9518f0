// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/extract.rs
//
// Final pixel copy of a crop region.

use image::{DynamicImage, GenericImageView};

use super::region::CropRegion;
use crate::domain::error::{CropError, CropResult};

/// Copy `region` out of `source` into a new buffer of exactly its size.
///
/// Fails instead of clipping: a region outside the image, an empty region or
/// one larger than `max_pixels` yields `ExtractionFailed`.
pub fn extract_pixels(
    source: &DynamicImage,
    region: CropRegion,
    max_pixels: u64,
) -> CropResult<DynamicImage> {
    let (img_width, img_height) = source.dimensions();

    if !region.is_valid() {
        return Err(CropError::extraction("crop region has zero width or height"));
    }
    if !region.fits_within(img_width, img_height) {
        return Err(CropError::extraction(format!(
            "crop region {:?} is outside image bounds ({img_width}, {img_height})",
            region.as_tuple()
        )));
    }
    match region.pixel_count() {
        Some(pixels) if pixels <= max_pixels => {}
        _ => {
            return Err(CropError::extraction(format!(
                "crop region {}x{} exceeds the {max_pixels} pixel limit",
                region.width, region.height
            )));
        }
    }

    let (x, y, width, height) = region.as_tuple();
    let cropped = source.crop_imm(x, y, width, height);

    if cropped.dimensions() != (width, height) {
        return Err(CropError::extraction(format!(
            "expected {width}x{height} output, got {}x{}",
            cropped.width(),
            cropped.height()
        )));
    }

    log::debug!("Extracted {width}x{height} at ({x}, {y})");
    Ok(cropped)
}
