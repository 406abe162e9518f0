// SPDX-License-Identifier: GPL-3.0-or-later
// tests/it/loader_tests.rs

use cropwise::app::document::DocumentKind;
use cropwise::app::loader::ImageLoader;
use cropwise::app::{AppMessage, update};

use crate::helpers::{model_with_image, write_png};

#[tokio::test]
async fn decodes_png_off_thread() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "photo.png", 320, 200);

    let mut loader = ImageLoader::new();
    let generation = loader.load(path.clone());
    let loaded = loader.next().await.unwrap();

    assert_eq!(loaded.generation, generation);
    assert_eq!(loaded.path, path);
    let source = loaded.result.unwrap();
    assert_eq!(source.dimensions(), (320, 200));
    assert_eq!(source.kind(), DocumentKind::Raster);
    assert_eq!(source.path(), Some(path.as_path()));
}

#[tokio::test]
async fn newer_request_supersedes_older_one() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_png(dir.path(), "a.png", 64, 64);
    let second = write_png(dir.path(), "b.png", 90, 30);

    let mut loader = ImageLoader::new();
    loader.load(first);
    let latest = loader.load(second.clone());
    assert_eq!(latest, 2);

    let loaded = loader.next().await.unwrap();
    assert_eq!(loaded.generation, 2);
    assert_eq!(loaded.path, second);
    assert_eq!(loaded.result.unwrap().dimensions(), (90, 30));
}

#[tokio::test]
async fn missing_file_is_reported_not_panicked() {
    let dir = tempfile::tempdir().unwrap();
    let mut loader = ImageLoader::new();
    loader.load(dir.path().join("missing.png"));

    let loaded = loader.next().await.unwrap();
    assert!(loaded.result.is_err());
}

#[tokio::test]
async fn unsupported_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"not an image").unwrap();

    let mut loader = ImageLoader::new();
    loader.load(path);
    let err = loader.next().await.unwrap().result.unwrap_err();
    assert!(err.to_string().contains("Unsupported format"), "{err:#}");
}

#[tokio::test]
async fn failed_load_keeps_current_image() {
    let mut model = model_with_image(200, 100, (200.0, 100.0));
    let rect = model.engine.rect();

    let dir = tempfile::tempdir().unwrap();
    let mut loader = ImageLoader::new();
    loader.load(dir.path().join("gone.png"));
    let loaded = loader.next().await.unwrap();
    let Err(e) = loaded.result else {
        panic!("expected a load failure");
    };

    update(&mut model, AppMessage::LoadFailed(format!("{e:#}")));
    assert!(model.error.is_some());
    assert!(model.has_image());
    assert_eq!(model.engine.rect(), rect);
}
