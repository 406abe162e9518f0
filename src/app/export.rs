// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/export.rs
//
// Encode a cropped buffer and hand it to the save collaborator.

use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::constant::{DEFAULT_JPEG_QUALITY, OUTPUT_BASE_NAME};
use crate::domain::{CropError, CropResult};

/// Encoding of the exported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    WebP,
}

impl OutputFormat {
    /// Format implied by a file name's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::WebP => ImageFormat::WebP,
        }
    }

    /// Default download name, e.g. `cropped.png`.
    pub fn default_file_name(self) -> String {
        format!("{OUTPUT_BASE_NAME}.{}", self.extension())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "png"),
            Self::Jpeg => write!(f, "jpeg"),
            Self::WebP => write!(f, "webp"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "webp" => Ok(Self::WebP),
            _ => Err(CropError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Encoder settings for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    pub format: OutputFormat,
    /// JPEG quality (1-100); ignored by the lossless formats.
    pub jpeg_quality: u8,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// An encoded crop ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: String,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl ExportedImage {
    /// Write to `path`; a directory receives the default file name.
    pub fn save(&self, path: &Path) -> CropResult<PathBuf> {
        let target = if path.is_dir() {
            path.join(&self.file_name)
        } else {
            path.to_path_buf()
        };
        std::fs::write(&target, &self.bytes)?;
        log::info!(
            "Saved {}x{} {} to {}",
            self.width,
            self.height,
            self.format,
            target.display()
        );
        Ok(target)
    }
}

/// Encode a cropped buffer with the given settings.
pub fn encode(image: &DynamicImage, settings: ExportSettings) -> CropResult<ExportedImage> {
    let mut bytes = Vec::new();

    match settings.format {
        OutputFormat::Png | OutputFormat::WebP => {
            DynamicImage::ImageRgba8(image.to_rgba8())
                .write_to(&mut Cursor::new(&mut bytes), settings.format.image_format())
                .map_err(CropError::Encode)?;
        }
        OutputFormat::Jpeg => {
            let quality = settings.jpeg_quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut bytes, quality)
                .encode_image(&flatten_on_white(image))
                .map_err(CropError::Encode)?;
        }
    }

    Ok(ExportedImage {
        file_name: settings.format.default_file_name(),
        format: settings.format,
        width: image.width(),
        height: image.height(),
        bytes,
    })
}

/// Composite over white, since JPEG has no alpha channel.
fn flatten_on_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = u16::from(a);
        let blend = |c: u8| ((u16::from(c) * alpha + 255 * (255 - alpha)) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}
