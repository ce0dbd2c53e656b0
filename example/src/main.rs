//! Drives a segmented control through a scripted gesture and logs what a
//! renderer would draw.

use std::time::Duration;

use tessera_segmented_control::{
    AnimationSpec, Appearance, ControlSnapshot, SegmentedControl, SegmentedControlStyle, Size,
    TouchEvent, TouchPhase,
};
use tracing::{debug, info};

const FRAME: Duration = Duration::from_micros(16_667);

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "error,tessera_segmented_control=info,segmented_control_demo=info",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn log_snapshot(snapshot: &ControlSnapshot) {
    let thumb = &snapshot.thumb;
    debug!(
        "thumb x={:.1} w={:.1} scale={:.3} hidden={}",
        thumb.frame.x, thumb.frame.width, thumb.transform.scale, thumb.hidden
    );
    for (index, item) in snapshot.items.iter().enumerate() {
        let title = item.content.title().unwrap_or("<image>");
        debug!(
            "  item {index} {title:?} alpha={:.2} selected={} arrow={:?}",
            item.alpha,
            item.selected,
            item.arrow.as_ref().map(|arrow| arrow.rotation)
        );
    }
}

/// Feeds `events` one frame apart, then runs the animations to rest.
fn play(control: &mut SegmentedControl, label: &str, events: &[TouchEvent]) {
    info!("{label}");
    for event in events {
        control.handle_touch(*event);
        control.advance(FRAME);
        log_snapshot(&control.snapshot());
    }

    let mut frames = 0;
    while control.is_animating() {
        control.advance(FRAME);
        frames += 1;
        let snapshot = control.snapshot();
        if frames % 6 == 0 {
            log_snapshot(&snapshot);
        }
    }
    info!(
        "settled after {frames} frames: selected={:?} reversed={}",
        control.selected_index(),
        control.selected_segment_reversed()
    );
}

fn main() {
    init_tracing();

    let mut control = SegmentedControl::with_items(["Name", "Date", "Size", "Kind"]);
    control.set_bounds(Size::new(320.0, 32.0));
    control.set_reversible_segment_indexes(&[0, 1]);
    control.set_on_change(|change| {
        info!(
            "selection changed: segment {} reversed={}",
            change.index, change.reversed
        );
    });

    let center = |index: usize| [80.0 * index as f32 + 40.0, 16.0];

    play(
        &mut control,
        "Tap on \"Date\"",
        &[TouchEvent::down(center(1)), TouchEvent::up(center(1))],
    );

    play(
        &mut control,
        "Tap \"Date\" again to reverse it",
        &[TouchEvent::down(center(1)), TouchEvent::up(center(1))],
    );

    play(
        &mut control,
        "Drag the thumb from \"Date\" to \"Kind\"",
        &[
            TouchEvent::down(center(1)),
            TouchEvent::drag(center(2)),
            TouchEvent::drag(center(3)),
            TouchEvent::up(center(3)),
        ],
    );

    control.set_segment_enabled(0, false);
    play(
        &mut control,
        "Preview \"Size\", leave the control and come back",
        &[
            TouchEvent::down(center(2)),
            TouchEvent::new(TouchPhase::DragExit, [160.0, 60.0]),
            TouchEvent::new(TouchPhase::DragOutside, [10.0, 60.0]),
            TouchEvent::new(TouchPhase::DragEnter, center(2)),
            TouchEvent::up(center(2)),
        ],
    );

    control.set_appearance(Appearance::Dark);
    control.set_style(SegmentedControlStyle::default().corner_radius(16.0));
    let snapshot = control.snapshot();
    info!(
        "dark track colour {:?}, thumb radius {}",
        snapshot.track.color, snapshot.thumb.corner_radius
    );

    control.set_bounds_animated(
        Size::new(400.0, 40.0),
        AnimationSpec::ease_in_out(Duration::from_millis(300)),
    );
    play(&mut control, "Grow the control", &[]);
}
