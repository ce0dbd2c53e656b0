use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use tessera_segmented_control::{
    Point, SegmentedControl, SelectionChange, Size, TouchEvent, TouchPhase, TrackingState,
    geometry::SegmentGeometry,
};

fn recorder(control: &mut SegmentedControl) -> Arc<Mutex<Vec<SelectionChange>>> {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);
    control.set_on_change(move |change| sink.lock().push(change));
    changes
}

/// Centre of segment `index` in a control of the default width.
fn center_of(control: &SegmentedControl, index: usize) -> Point {
    let width = control.bounds().width / control.number_of_segments() as f32;
    Point::new(width * index as f32 + width * 0.5, 16.0)
}

#[test]
fn segment_frames_tile_the_track() {
    for count in 1..=9 {
        for width in [120.0, 300.0, 333.0, 375.5] {
            let geometry = SegmentGeometry::new(Size::new(width, 32.0), count, 2.0, 8.0);
            let frames: Vec<_> = (0..count).map(|i| geometry.frame_for_segment(i)).collect();

            assert_eq!(frames[0].x, 2.0);
            assert!(frames[count - 1].max_x() <= width - 2.0);
            for pair in frames.windows(2) {
                assert!(pair[0].max_x() <= pair[1].x);
            }
        }
    }
}

#[test]
fn selecting_the_same_index_twice_is_silent() {
    let mut control = SegmentedControl::with_items(["A", "B", "C"]);
    control.snapshot();
    let changes = recorder(&mut control);

    control.set_selected_index(Some(1));
    control.snapshot();
    control.set_selected_index(Some(1));

    assert_eq!(changes.lock().len(), 1);
    assert!(!control.needs_layout());
    assert!(!control.is_animating());
}

#[test]
fn tap_on_unselected_segment_selects_it_once() {
    let mut control = SegmentedControl::with_items(["A", "B", "C"]);
    let changes = recorder(&mut control);

    control.handle_touch(TouchEvent::down(center_of(&control, 1)));
    control.handle_touch(TouchEvent::up(center_of(&control, 1)));

    assert_eq!(control.selected_index(), Some(1));
    assert_eq!(
        *changes.lock(),
        vec![SelectionChange {
            index: 1,
            reversed: false
        }]
    );
}

#[test]
fn tap_on_selected_reversible_segment_toggles_direction() {
    let mut control = SegmentedControl::with_items(["A", "B", "C"]);
    control.set_segment_reversible(0, true);
    let changes = recorder(&mut control);

    for _ in 0..2 {
        control.handle_touch(TouchEvent::down(center_of(&control, 0)));
        control.handle_touch(TouchEvent::up(center_of(&control, 0)));
    }

    assert_eq!(
        *changes.lock(),
        vec![
            SelectionChange {
                index: 0,
                reversed: true
            },
            SelectionChange {
                index: 0,
                reversed: false
            },
        ]
    );
}

#[test]
fn tap_on_selected_plain_segment_is_silent() {
    let mut control = SegmentedControl::with_items(["A", "B", "C"]);
    let changes = recorder(&mut control);

    control.handle_touch(TouchEvent::down(center_of(&control, 0)));
    control.handle_touch(TouchEvent::up(center_of(&control, 0)));

    assert!(changes.lock().is_empty());
    assert!(!control.is_segment_reversed(0));
}

#[test]
fn disabling_selected_segment_moves_selection() {
    let mut control = SegmentedControl::with_items(["A", "B", "C"]);
    let changes = recorder(&mut control);

    control.set_segment_enabled(0, false);
    assert_eq!(control.selected_index(), Some(1));

    control.set_selected_index(Some(2));
    control.set_segment_enabled(2, false);
    assert_eq!(control.selected_index(), Some(1));

    control.set_segment_enabled(1, false);
    assert_eq!(control.selected_index(), None);

    // Only the explicit selection notified.
    assert_eq!(changes.lock().len(), 1);
}

#[test]
fn disabling_selected_segment_always_lands_on_enabled_segment() {
    for count in 3..6 {
        for selected in 0..count {
            for extra_disabled in 0..count {
                let items: Vec<String> = (0..count).map(|i| format!("{i}")).collect();
                let mut control = SegmentedControl::with_items(items);
                if extra_disabled != selected {
                    control.set_segment_enabled(extra_disabled, false);
                }
                control.set_selected_index(Some(selected));
                control.set_segment_enabled(selected, false);

                let index = control.selected_index().expect("an enabled segment remains");
                assert!(control.is_segment_enabled(index));
            }
        }
    }
}

#[test]
fn removing_all_segments_resets_everything() {
    let mut control = SegmentedControl::with_items(["A", "B", "C"]);
    control.remove_all_segments();

    assert_eq!(control.number_of_segments(), 0);
    assert_eq!(control.separator_count(), 0);
    assert_eq!(control.selected_index(), None);
    let snapshot = control.snapshot();
    assert!(snapshot.items.is_empty());
    assert!(snapshot.separators.is_empty());
    assert!(snapshot.thumb.hidden);
}

#[test]
fn insert_keeps_selected_index_value() {
    let mut control = SegmentedControl::with_items(["A", "B", "C"]);
    control.set_segment_enabled(0, false);
    assert_eq!(control.selected_index(), Some(1));

    control.insert_segment("New", false, 1);
    assert_eq!(control.number_of_segments(), 4);
    assert_eq!(control.separator_count(), 3);
    assert_eq!(control.selected_index(), Some(1));
    assert_eq!(control.title_for_segment(1), Some("New"));
}

#[test]
fn drag_from_last_to_first_selects_first() {
    let mut control = SegmentedControl::new();
    control.append_segment("A", false);
    control.append_segment("B", false);
    control.append_segment("C", false);
    assert_eq!(control.selected_index(), None);
    let changes = recorder(&mut control);

    control.handle_touch(TouchEvent::down(center_of(&control, 2)));
    control.handle_touch(TouchEvent::drag(center_of(&control, 1)));
    control.handle_touch(TouchEvent::drag(center_of(&control, 0)));
    assert_eq!(control.focused_index(), Some(0));
    control.handle_touch(TouchEvent::up(center_of(&control, 0)));

    assert_eq!(control.selected_index(), Some(0));
    assert_eq!(changes.lock().len(), 1);
    assert_eq!(control.focused_index(), None);
    assert_eq!(control.tracking_state(), TrackingState::Idle);
}

#[test]
fn thumb_follows_drag_before_commit() {
    let mut control = SegmentedControl::with_items(["A", "B", "C"]);
    control.snapshot();

    control.handle_touch(TouchEvent::down(center_of(&control, 0)));
    control.handle_touch(TouchEvent::drag(center_of(&control, 2)));
    assert_eq!(control.selected_index(), Some(0));
    control.advance(Duration::from_millis(450));

    let snapshot = control.snapshot();
    assert_eq!(snapshot.thumb.frame.x, 198.0);
    assert!(snapshot.items[2].selected);
    assert!(!snapshot.items[0].selected);
    assert_eq!(snapshot.items[2].transform.scale, 0.95);

    let change = control.handle_touch(TouchEvent::up(center_of(&control, 2)));
    assert_eq!(change.map(|change| change.index), Some(2));
}

#[test]
fn interrupted_animation_starts_from_screen_position() {
    let mut control = SegmentedControl::with_items(["A", "B", "C"]);
    control.snapshot();

    control.handle_touch(TouchEvent::down(center_of(&control, 0)));
    control.handle_touch(TouchEvent::drag(center_of(&control, 2)));
    control.advance(Duration::from_millis(100));
    let before = control.snapshot().thumb.frame.x;

    control.handle_touch(TouchEvent::drag(center_of(&control, 1)));
    let after = control.snapshot().thumb.frame.x;
    assert!((before - after).abs() < 1e-3, "{before} vs {after}");
}

#[test]
fn exit_and_reenter_restores_preview() {
    let mut control = SegmentedControl::with_items(["A", "B", "C"]);
    control.snapshot();

    control.handle_touch(TouchEvent::down(center_of(&control, 1)));
    control.handle_touch(TouchEvent::new(TouchPhase::DragExit, [150.0, 60.0]));
    assert_eq!(control.focused_index(), None);
    control.advance(Duration::from_millis(500));
    assert_eq!(control.snapshot().items[1].alpha, 1.0);

    control.handle_touch(TouchEvent::new(TouchPhase::DragEnter, center_of(&control, 2)));
    assert_eq!(control.focused_index(), Some(2));
    control.advance(Duration::from_millis(500));
    assert_eq!(control.snapshot().items[2].alpha, 0.3);
}
