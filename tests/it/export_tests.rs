// SPDX-License-Identifier: GPL-3.0-or-later
// tests/it/export_tests.rs

use cropwise::app::export::OutputFormat;
use cropwise::app::{AppMessage, UpdateResult, update};
use cropwise::domain::crop::CropRect;
use image::GenericImageView;

use crate::helpers::model_with_image;

fn export(format: OutputFormat) -> cropwise::app::export::ExportedImage {
    let mut model = model_with_image(300, 240, (800.0, 500.0));
    update(
        &mut model,
        AppMessage::SetRect(CropRect::new(20.4, 30.6, 120.2, 80.5)),
    );
    update(&mut model, AppMessage::SetOutputFormat(format));
    match update(&mut model, AppMessage::Export) {
        UpdateResult::Exported(exported) => exported,
        other => panic!("expected export, got {other:?} ({:?})", model.error),
    }
}

#[test]
fn saving_into_directory_uses_default_name() {
    let dir = tempfile::tempdir().unwrap();
    let saved = export(OutputFormat::Png).save(dir.path()).unwrap();

    assert_eq!(saved, dir.path().join("cropped.png"));
    let reopened = image::open(&saved).unwrap();
    // Rounded region: (20, 31, 120, 81).
    assert_eq!(reopened.dimensions(), (120, 81));
    assert_eq!(reopened.get_pixel(0, 0).0, [20, 31, 128, 255]);
}

#[test]
fn saving_to_explicit_jpeg_path() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.jpg");
    let exported = export(OutputFormat::Jpeg);
    assert_eq!(exported.file_name, "cropped.jpg");

    let saved = exported.save(&target).unwrap();
    assert_eq!(saved, target);
    let reopened = image::open(&saved).unwrap();
    assert_eq!(reopened.dimensions(), (120, 81));
}

#[test]
fn webp_export_decodes_to_crop_size() {
    let exported = export(OutputFormat::WebP);
    assert_eq!(exported.file_name, "cropped.webp");
    let decoded = image::load_from_memory(&exported.bytes).unwrap();
    assert_eq!(decoded.dimensions(), (120, 81));
}

#[test]
fn save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let exported = export(OutputFormat::Png);
    assert!(exported.save(&dir.path().join("no/such/dir/out.png")).is_err());
}
