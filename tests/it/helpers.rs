// SPDX-License-Identifier: GPL-3.0-or-later
// tests/it/helpers.rs

use std::path::{Path, PathBuf};

use cropwise::app::document::SourceImage;
use cropwise::app::{AppMessage, AppModel, update};
use cropwise::config::AppConfig;
use cropwise::domain::crop::{CountingCapture, DisplayMapping, Rect};
use image::{DynamicImage, Rgba, RgbaImage};

/// Image whose pixels encode their own coordinates (mod 256).
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    }))
}

/// Model holding a `width` x `height` image laid out in a `viewport` container.
pub fn model_with_image(
    width: u32,
    height: u32,
    viewport: (f32, f32),
) -> AppModel<CountingCapture> {
    let mut model = AppModel::with_capture(&AppConfig::default(), CountingCapture::default());
    update(
        &mut model,
        AppMessage::ImageLoaded(SourceImage::from_image(gradient(width, height))),
    );
    layout(&mut model, viewport);
    model
}

pub fn layout(model: &mut AppModel<CountingCapture>, viewport: (f32, f32)) {
    let natural = model.source.as_ref().map(SourceImage::dimensions).unwrap();
    let container = Rect::new(0.0, 0.0, viewport.0, viewport.1);
    let image = DisplayMapping::contain(container, natural);
    update(model, AppMessage::Layout { container, image });
}

pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    gradient(width, height).save(&path).unwrap();
    path
}
