// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/document/mod.rs
//
// Document module root: kind detection and the loaded source image.

pub mod raster;
#[cfg(feature = "vector")]
pub mod vector;

use std::fmt;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView, ImageFormat};

use self::raster::RasterDocument;
#[cfg(feature = "vector")]
use self::vector::VectorDocument;
use crate::domain::CropError;

/// Result alias for document loading.
pub type DocResult<T> = anyhow::Result<T>;

/// Supported document kinds (for format detection).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Raster,
    #[cfg(feature = "vector")]
    Vector,
}

impl DocumentKind {
    /// Detect document kind from file path.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();

        #[cfg(feature = "vector")]
        if ext == "svg" || ext == "svgz" {
            return Some(Self::Vector);
        }

        if ImageFormat::from_extension(&ext).is_some() {
            return Some(Self::Raster);
        }

        None
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raster => write!(f, "Raster"),
            #[cfg(feature = "vector")]
            Self::Vector => write!(f, "Vector"),
        }
    }
}

/// A decoded image ready for cropping.
///
/// Dimensions are those of the displayed image: EXIF orientation has already
/// been applied and vector documents are rasterized at their native size.
pub struct SourceImage {
    path: Option<PathBuf>,
    kind: DocumentKind,
    pixels: DynamicImage,
}

impl fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.dimensions();
        f.debug_struct("SourceImage")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("dimensions", &format_args!("{w}x{h}"))
            .finish()
    }
}

impl SourceImage {
    /// Wrap an already decoded raster image.
    pub fn from_image(pixels: DynamicImage) -> Self {
        Self {
            path: None,
            kind: DocumentKind::Raster,
            pixels,
        }
    }

    /// Natural pixel dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Open any supported file as a source image.
pub fn open_source_image(path: &Path) -> DocResult<SourceImage> {
    let kind = DocumentKind::from_path(path)
        .ok_or_else(|| CropError::UnsupportedFormat(path.display().to_string()))?;

    let pixels = match kind {
        DocumentKind::Raster => RasterDocument::open(path)?.into_image(),
        #[cfg(feature = "vector")]
        DocumentKind::Vector => VectorDocument::open(path)?.into_image(),
    };

    let (w, h) = pixels.dimensions();
    log::info!("Opened {} ({kind}, {w}x{h})", path.display());

    Ok(SourceImage {
        path: Some(path.to_path_buf()),
        kind,
        pixels,
    })
}
