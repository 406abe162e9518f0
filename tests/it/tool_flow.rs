// SPDX-License-Identifier: GPL-3.0-or-later
// tests/it/tool_flow.rs
//
// End-to-end message flow through the crop tool host.

use cropwise::app::document::SourceImage;
use cropwise::app::gesture::Gesture;
use cropwise::app::{AppMessage, UpdateResult, update};
use cropwise::domain::crop::{CropRect, DragHandle, DragMode, handle_center};
use image::GenericImageView;

use crate::helpers::{gradient, layout, model_with_image};

#[test]
fn load_resets_to_centered_default() {
    let model = model_with_image(1000, 800, (1000.0, 800.0));
    assert_eq!(
        model.engine.rect(),
        Some(CropRect::new(250.0, 200.0, 500.0, 400.0))
    );
    assert_eq!(model.engine.mapping().unwrap().scale, 1.0);
}

#[test]
fn east_gesture_is_capped_at_image_edge() {
    let mut model = model_with_image(1000, 800, (1000.0, 800.0));
    let gesture: Gesture = "e:300,0".parse().unwrap();
    let rect = gesture.replay(&mut model).unwrap();
    assert_eq!(rect.w, 750.0);
    assert_eq!(model.engine.capture().active(), 0);
}

#[test]
fn west_gesture_pins_minimum_width() {
    let mut model = model_with_image(1000, 800, (1000.0, 800.0));
    update(
        &mut model,
        AppMessage::SetRect(CropRect::new(100.0, 100.0, 60.0, 60.0)),
    );
    let rect = "w:50,0".parse::<Gesture>().unwrap().replay(&mut model).unwrap();
    assert_eq!((rect.x, rect.w), (110.0, 50.0));
}

#[test]
fn pointer_down_on_a_handle_starts_a_resize() {
    // 1000x800 in 800x500 is letterboxed at scale 0.625.
    let mut model = model_with_image(1000, 800, (800.0, 500.0));
    let mapping = *model.engine.mapping().unwrap();
    assert_eq!(mapping.scale, 0.625);

    let selection = mapping.rect_to_screen(&model.engine.rect().unwrap());
    let grip = handle_center(selection, DragHandle::SouthEast);

    update(&mut model, AppMessage::PointerDown { x: grip.x, y: grip.y });
    assert_eq!(
        model.engine.drag_mode(),
        Some(DragMode::Resize(DragHandle::SouthEast))
    );

    // 50 screen px are 80 source px at this scale.
    update(
        &mut model,
        AppMessage::PointerMove {
            x: grip.x + 50.0,
            y: grip.y + 50.0,
        },
    );
    update(&mut model, AppMessage::PointerUp);

    let rect = model.engine.rect().unwrap();
    assert_eq!((rect.w, rect.h), (580.0, 480.0));
    assert!(!model.engine.is_dragging());
}

#[test]
fn pointer_down_outside_selection_does_nothing() {
    let mut model = model_with_image(1000, 800, (1000.0, 800.0));
    let result = update(&mut model, AppMessage::PointerDown { x: 5.0, y: 5.0 });
    assert!(matches!(result, UpdateResult::None));
    assert!(!model.engine.is_dragging());
}

#[test]
fn drag_continues_outside_the_crop_box() {
    let mut model = model_with_image(1000, 800, (1000.0, 800.0));
    update(&mut model, AppMessage::PointerDown { x: 500.0, y: 400.0 });
    assert_eq!(model.engine.drag_mode(), Some(DragMode::Move));

    // Far outside the box and the preview: still tracked, clamped.
    update(
        &mut model,
        AppMessage::PointerMove {
            x: -2000.0,
            y: 400.0,
        },
    );
    assert_eq!(model.engine.rect().unwrap().x, 0.0);
    update(&mut model, AppMessage::PointerUp);
}

#[test]
fn new_image_invalidates_open_drag() {
    let mut model = model_with_image(1000, 800, (1000.0, 800.0));
    update(&mut model, AppMessage::PointerDown { x: 500.0, y: 400.0 });
    assert_eq!(model.engine.capture().active(), 1);

    update(
        &mut model,
        AppMessage::ImageLoaded(SourceImage::from_image(gradient(400, 300))),
    );
    assert!(!model.engine.is_dragging());
    assert_eq!(model.engine.capture().active(), 0);

    // Late pointer events from the old drag are ignored.
    let result = update(&mut model, AppMessage::PointerMove { x: 0.0, y: 0.0 });
    assert!(matches!(result, UpdateResult::None));
    assert_eq!(
        model.engine.rect(),
        Some(CropRect::new(100.0, 75.0, 200.0, 150.0))
    );

    // The new image is usable once laid out.
    layout(&mut model, (800.0, 500.0));
    assert!(model.engine.mapping().is_some());
}

#[test]
fn layout_change_keeps_rect() {
    let mut model = model_with_image(1000, 800, (1000.0, 800.0));
    let before = model.engine.rect();
    layout(&mut model, (400.0, 400.0));
    assert_eq!(model.engine.rect(), before);
    assert_eq!(model.engine.mapping().unwrap().scale, 0.4);
}

#[test]
fn export_produces_exact_crop_size_at_any_scale() {
    for viewport in [(100.0, 80.0), (1000.0, 800.0), (3000.0, 3000.0)] {
        let mut model = model_with_image(400, 300, viewport);
        update(
            &mut model,
            AppMessage::SetRect(CropRect::new(10.0, 10.0, 200.0, 150.0)),
        );
        let UpdateResult::Exported(exported) = update(&mut model, AppMessage::Export) else {
            panic!("export failed: {:?}", model.error);
        };
        assert_eq!(exported.file_name, "cropped.png");

        let decoded = image::load_from_memory(&exported.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (200, 150));
        assert_eq!(decoded.get_pixel(0, 0).0, [10, 10, 128, 255]);
    }
}

#[test]
fn export_without_image_reports_error() {
    let mut model = cropwise::app::AppModel::new(&cropwise::config::AppConfig::default());
    let result = update(&mut model, AppMessage::Export);
    assert!(matches!(result, UpdateResult::Redraw));
    assert_eq!(model.error.as_deref(), Some("No image loaded"));
}

#[test]
fn reset_rect_restores_default() {
    let mut model = model_with_image(1000, 800, (1000.0, 800.0));
    "move:-100,-100"
        .parse::<Gesture>()
        .unwrap()
        .replay(&mut model)
        .unwrap();
    update(&mut model, AppMessage::ResetRect);
    assert_eq!(
        model.engine.rect(),
        Some(CropRect::new(250.0, 200.0, 500.0, 400.0))
    );
}
