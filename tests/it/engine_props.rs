// SPDX-License-Identifier: GPL-3.0-or-later
// tests/it/engine_props.rs
//
// Invariant properties of the crop engine under arbitrary drags.

use cropwise::domain::crop::{
    CountingCapture, CropBounds, CropEngine, CropRect, DragHandle, DragMode, Point, Rect,
};
use proptest::prelude::*;

/// Slack when comparing a rectangle's motion with the pointer's.
const EPS: f32 = 1e-2;

fn engine(width: u32, height: u32, scale: f32) -> CropEngine<CountingCapture> {
    let mut engine = CropEngine::with_capture(CountingCapture::default());
    engine.reset_for_image(width, height);
    let container = Rect::new(0.0, 0.0, width as f32 * scale, height as f32 * scale);
    assert!(engine.recompute_display_mapping(container, container));
    engine
}

fn assert_invariants(rect: &CropRect, bounds: &CropBounds) {
    assert!(rect.x >= 0.0, "x < 0: {rect:?}");
    assert!(rect.y >= 0.0, "y < 0: {rect:?}");
    assert!(rect.right() <= bounds.width, "right edge outside: {rect:?}");
    assert!(rect.bottom() <= bounds.height, "bottom edge outside: {rect:?}");
    assert!(rect.w >= bounds.min_width, "too narrow: {rect:?}");
    assert!(rect.h >= bounds.min_height, "too short: {rect:?}");
    assert!(rect.satisfies(bounds));
}

fn any_mode() -> impl Strategy<Value = DragMode> {
    prop_oneof![
        Just(DragMode::Move),
        proptest::sample::select(DragHandle::ALL.to_vec()).prop_map(DragMode::Resize),
    ]
}

fn pointer_path() -> impl Strategy<Value = Vec<(f32, f32)>> {
    prop::collection::vec((-4000.0f32..4000.0, -4000.0f32..4000.0), 1..40)
}

proptest! {
    #[test]
    fn drags_never_break_invariants(
        width in 1u32..3000,
        height in 1u32..3000,
        scale in 0.05f32..4.0,
        sessions in prop::collection::vec((any_mode(), pointer_path()), 1..6),
    ) {
        let mut engine = engine(width, height, scale);
        let bounds = *engine.bounds().unwrap();
        assert_invariants(&engine.rect().unwrap(), &bounds);

        for (mode, path) in sessions {
            prop_assert!(engine.begin_drag(Point::new(0.0, 0.0), mode));
            for (x, y) in path {
                let rect = engine.update_drag(Point::new(x, y)).unwrap();
                assert_invariants(&rect, &bounds);
            }
            engine.end_drag();
        }
        prop_assert_eq!(engine.capture().active(), 0);
    }

    #[test]
    fn single_edge_resize_keeps_minimum_size(
        handle in proptest::sample::select(vec![
            DragHandle::North, DragHandle::East, DragHandle::South, DragHandle::West,
        ]),
        path in pointer_path(),
    ) {
        let mut engine = engine(1000, 800, 1.0);
        engine.begin_drag(Point::new(0.0, 0.0), DragMode::Resize(handle));
        for (x, y) in path {
            let rect = engine.update_drag(Point::new(x, y)).unwrap();
            prop_assert!(rect.w >= 50.0 && rect.h >= 50.0, "{:?}", rect);
        }
    }

    #[test]
    fn repeating_a_pointer_position_changes_nothing(
        mode in any_mode(),
        path in pointer_path(),
    ) {
        let mut engine = engine(1200, 900, 0.75);
        engine.begin_drag(Point::new(0.0, 0.0), mode);
        for (x, y) in path {
            let first = engine.update_drag(Point::new(x, y));
            let second = engine.update_drag(Point::new(x, y));
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn move_follows_pointer_without_recoil(
        scale in 0.25f32..2.0,
        path in pointer_path(),
    ) {
        let mut engine = engine(1000, 800, scale);
        let mut pointer = Point::new(0.0, 0.0);
        engine.begin_drag(pointer, DragMode::Move);
        let mut last = engine.rect().unwrap();

        for (x, y) in path {
            let next = Point::new(x, y);
            let rect = engine.update_drag(next).unwrap();
            let (dx, dy) = ((next.x - pointer.x) / scale, (next.y - pointer.y) / scale);
            let (mx, my) = (rect.x - last.x, rect.y - last.y);

            // The box moves with the pointer, never against it, and never further.
            prop_assert!(mx * dx >= -EPS && my * dy >= -EPS);
            prop_assert!(mx.abs() <= dx.abs() + EPS && my.abs() <= dy.abs() + EPS);

            pointer = next;
            last = rect;
        }
    }
}

#[test]
fn reversal_after_boundary_moves_back_immediately() {
    let mut engine = engine(1000, 800, 1.0);
    engine.begin_drag(Point::new(0.0, 0.0), DragMode::Resize(DragHandle::East));

    // Overshoot the right edge by 500 px, then come back 100 px.
    let clamped = engine.update_drag(Point::new(750.0, 0.0)).unwrap();
    assert_eq!(clamped.w, 750.0);
    let back = engine.update_drag(Point::new(650.0, 0.0)).unwrap();
    assert_eq!(back.w, 650.0);
}

#[test]
fn engine_without_listeners_leaks_nothing_across_many_drags() {
    let mut engine = engine(640, 480, 1.0);
    for i in 0..100 {
        let mode = if i % 2 == 0 {
            DragMode::Move
        } else {
            DragMode::Resize(DragHandle::ALL[i % 8])
        };
        engine.begin_drag(Point::new(0.0, 0.0), mode);
        engine.update_drag(Point::new(i as f32, -(i as f32)));
        engine.end_drag();
    }
    assert_eq!(engine.capture().attached, 100);
    assert_eq!(engine.capture().active(), 0);
}
