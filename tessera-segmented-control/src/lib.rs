//! A selectable multi-segment toggle control for touch interfaces.
//!
//! The control renders a row of text or image segments with a sliding
//! thumb behind the selection. Users pick a segment by tapping it or by
//! dragging across the row; tapping the selected segment again flips the
//! direction of reversible segments.
//!
//! The crate is headless: the host feeds touch events in, advances the
//! animation clock and draws the [`ControlSnapshot`] it gets back.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//!
//! use tessera_segmented_control::{SegmentedControl, TouchEvent};
//!
//! let mut control = SegmentedControl::with_items(["Name", "Date", "Size"]);
//! control.set_segment_reversible(1, true);
//! control.set_on_change(|change| {
//!     println!("segment {} reversed: {}", change.index, change.reversed);
//! });
//!
//! // Tap "Date".
//! control.handle_touch(TouchEvent::down([150.0, 16.0]));
//! control.handle_touch(TouchEvent::up([150.0, 16.0]));
//! assert_eq!(control.selected_index(), Some(1));
//!
//! // Tap it again to flip its direction.
//! control.handle_touch(TouchEvent::down([150.0, 16.0]));
//! control.handle_touch(TouchEvent::up([150.0, 16.0]));
//! assert!(control.selected_segment_reversed());
//!
//! while control.is_animating() {
//!     control.advance(Duration::from_millis(16));
//!     let _frame = control.snapshot();
//! }
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod color;
pub mod control;
pub mod geometry;
pub mod gesture;
pub mod glyph;
pub mod rect;
pub mod segment;
pub mod theme;
pub mod visual;

pub use crate::{
    animation::{AnimationSpec, Transition},
    color::{Appearance, Color, DynamicColor},
    control::{ChangeHandler, SegmentedControl, SelectionChange},
    gesture::{TouchEvent, TouchPhase, TrackingState},
    rect::{Point, Rect, Size},
    segment::{ContentMeasurer, EstimatedMetrics, ImageData, Segment, SegmentContent},
    theme::{SegmentedControlDefaults, SegmentedControlStyle},
    visual::ControlSnapshot,
};
