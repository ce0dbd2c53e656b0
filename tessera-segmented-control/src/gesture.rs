//! Touch tracking and the selection state machine.
//!
//! ## Usage
//!
//! The host forwards every touch phase as a [`TouchEvent`] in the control's
//! local coordinates. [`SelectionTracker::handle`] turns the event into a
//! [`GestureStep`]: the visual commands to animate, the [`Transition`] that
//! times them and, when the touch lifts, the [`Commit`] to apply.
//!
//! A gesture that starts on the selected segment drags the thumb; any other
//! gesture previews a new selection by fading the segment under the finger.

use smallvec::SmallVec;
use tracing::trace;

use crate::{animation::Transition, rect::Point};

/// Phase of a touch as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// The finger went down inside the control.
    Down,
    /// The finger moved while inside the control.
    DragInside,
    /// The finger moved while outside the control.
    DragOutside,
    /// The finger left the control's bounds.
    DragExit,
    /// The finger re-entered the control's bounds.
    DragEnter,
    /// The finger lifted inside the control.
    UpInside,
    /// The finger lifted outside the control.
    UpOutside,
}

impl TouchPhase {
    /// Whether the phase ends the gesture.
    pub fn is_up(self) -> bool {
        matches!(self, TouchPhase::UpInside | TouchPhase::UpOutside)
    }
}

/// A touch phase with its location in the control's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Phase of the touch.
    pub phase: TouchPhase,
    /// Location relative to the control's top-left corner.
    pub location: Point,
}

impl TouchEvent {
    /// Creates a touch event.
    pub fn new(phase: TouchPhase, location: impl Into<Point>) -> Self {
        Self {
            phase,
            location: location.into(),
        }
    }

    /// A touch going down at `location`.
    pub fn down(location: impl Into<Point>) -> Self {
        Self::new(TouchPhase::Down, location)
    }

    /// A drag to `location`, inside the control.
    pub fn drag(location: impl Into<Point>) -> Self {
        Self::new(TouchPhase::DragInside, location)
    }

    /// A touch lifting at `location`, inside the control.
    pub fn up(location: impl Into<Point>) -> Self {
        Self::new(TouchPhase::UpInside, location)
    }
}

/// Which kind of gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackingState {
    /// No gesture.
    #[default]
    Idle,
    /// The gesture began on the selected segment and moves the thumb.
    TrackingThumb,
    /// The gesture began on an unselected segment and previews it.
    TrackingSegment,
}

/// What the state machine reads from the control.
pub trait SelectionModel {
    /// Whether the control accepts interaction at all.
    fn is_enabled(&self) -> bool;
    /// Index of the segment under `point`, `None` without segments.
    fn segment_index_for_point(&self, point: Point) -> Option<usize>;
    /// Whether the segment at `index` ignores touches.
    fn is_segment_disabled(&self, index: usize) -> bool;
    /// Whether the segment at `index` flips direction when tapped again.
    fn is_segment_reversible(&self, index: usize) -> bool;
    /// The committed selection.
    fn selected_index(&self) -> Option<usize>;
}

/// A visual change requested by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualCommand {
    /// Dim or restore the item at `index`.
    SetFaded {
        /// Segment index.
        index: usize,
        /// Whether the item previews a selection.
        faded: bool,
    },
    /// Shrink or restore the thumb together with the item at `index`.
    SetPressed {
        /// Segment index.
        index: usize,
        /// Whether the thumb is held.
        pressed: bool,
    },
    /// Carry the thumb and the selected styling from one segment to another
    /// without committing the selection.
    MoveThumb {
        /// Segment currently under the thumb.
        from: usize,
        /// Segment the thumb moves to.
        to: usize,
    },
    /// Restore every item, the thumb and the separators to the committed
    /// selection.
    ShowSelection,
    /// Point the direction arrow of `index` the way its segment faces.
    SyncDirection {
        /// Segment index.
        index: usize,
    },
}

/// A semantic change produced when a gesture ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// Select the segment at the index.
    Select(usize),
    /// Flip the direction of the selected, reversible segment at the index.
    ToggleReversed(usize),
}

/// Result of feeding one touch event to the tracker.
///
/// Apply `commit` first, then play `commands` with `transition`'s timing.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureStep {
    /// Timing and effect of the commands.
    pub transition: Transition,
    /// Visual changes, in order.
    pub commands: SmallVec<[VisualCommand; 4]>,
    /// Semantic change to apply, at most one per gesture.
    pub commit: Option<Commit>,
}

impl GestureStep {
    fn new(transition: Transition) -> Self {
        Self {
            transition,
            commands: SmallVec::new(),
            commit: None,
        }
    }

    fn with(mut self, command: VisualCommand) -> Self {
        self.commands.push(command);
        self
    }
}

/// The selection state machine for one control.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    state: TrackingState,
    focused_index: Option<usize>,
    dragged_off_original_segment: bool,
}

impl SelectionTracker {
    /// An idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> TrackingState {
        self.state
    }

    /// Segment under the finger, `None` when idle or outside the control.
    pub fn focused_index(&self) -> Option<usize> {
        self.focused_index
    }

    /// Whether the current gesture began on the selected segment.
    pub fn is_dragging_thumb(&self) -> bool {
        self.state == TrackingState::TrackingThumb
    }

    /// Whether the finger has moved to another segment during this gesture.
    pub fn dragged_off_original_segment(&self) -> bool {
        self.dragged_off_original_segment
    }

    /// Abandons any gesture in progress without producing a step.
    pub fn cancel(&mut self) {
        if self.state != TrackingState::Idle {
            trace!("Gesture cancelled in {:?}", self.state);
        }
        *self = Self::default();
    }

    /// Feeds one touch event through the state machine.
    ///
    /// Returns `None` when the event changes nothing on screen.
    pub fn handle(
        &mut self,
        event: &TouchEvent,
        model: &impl SelectionModel,
    ) -> Option<GestureStep> {
        if !model.is_enabled() {
            return None;
        }

        match (self.state, event.phase) {
            (TrackingState::Idle, TouchPhase::Down) => self.touch_down(event.location, model),
            (TrackingState::Idle, _) => None,
            // A new touch-down mid-gesture restarts tracking.
            (_, TouchPhase::Down) => {
                self.cancel();
                self.touch_down(event.location, model)
            }
            (_, TouchPhase::DragInside | TouchPhase::DragOutside) => {
                self.drag(event.location, model)
            }
            (_, TouchPhase::DragExit) => self.exit_bounds(),
            (_, TouchPhase::DragEnter) => self.enter_bounds(event.location, model),
            (_, TouchPhase::UpInside | TouchPhase::UpOutside) => {
                self.touch_up(event.location, model)
            }
        }
    }

    fn touch_down(&mut self, location: Point, model: &impl SelectionModel) -> Option<GestureStep> {
        let tapped = model.segment_index_for_point(location)?;
        if model.is_segment_disabled(tapped) {
            trace!("Touch down on disabled segment {tapped} ignored");
            return None;
        }

        self.focused_index = Some(tapped);
        self.dragged_off_original_segment = false;

        if model.selected_index() == Some(tapped) {
            self.state = TrackingState::TrackingThumb;
            trace!("Tracking thumb from segment {tapped}");
            Some(GestureStep::new(Transition::PressThumb).with(VisualCommand::SetPressed {
                index: tapped,
                pressed: true,
            }))
        } else {
            self.state = TrackingState::TrackingSegment;
            trace!("Tracking segment {tapped}");
            Some(GestureStep::new(Transition::PressSegment).with(VisualCommand::SetFaded {
                index: tapped,
                faded: true,
            }))
        }
    }

    fn drag(&mut self, location: Point, model: &impl SelectionModel) -> Option<GestureStep> {
        let tapped = model.segment_index_for_point(location)?;
        if Some(tapped) == self.focused_index || model.is_segment_disabled(tapped) {
            return None;
        }

        self.dragged_off_original_segment = true;

        // Left the control while previewing; only re-entering restores focus.
        let focused = self.focused_index?;
        self.focused_index = Some(tapped);
        trace!("Focus moved from segment {focused} to {tapped}");

        if self.is_dragging_thumb() {
            return Some(
                GestureStep::new(Transition::DragThumb).with(VisualCommand::MoveThumb {
                    from: focused,
                    to: tapped,
                }),
            );
        }

        let mut step = GestureStep::new(Transition::FocusSegment).with(VisualCommand::SetFaded {
            index: focused,
            faded: false,
        });
        if model.selected_index() != Some(tapped) {
            step = step.with(VisualCommand::SetFaded {
                index: tapped,
                faded: true,
            });
        }
        Some(step)
    }

    fn exit_bounds(&mut self) -> Option<GestureStep> {
        if self.is_dragging_thumb() {
            return None;
        }

        let focused = self.focused_index.take()?;
        trace!("Touch left the control, segment {focused} restored");
        Some(GestureStep::new(Transition::ExitBounds).with(VisualCommand::SetFaded {
            index: focused,
            faded: false,
        }))
    }

    fn enter_bounds(&mut self, location: Point, model: &impl SelectionModel) -> Option<GestureStep> {
        if self.is_dragging_thumb() {
            return None;
        }

        let tapped = model.segment_index_for_point(location)?;
        self.focused_index = Some(tapped);
        trace!("Touch re-entered the control over segment {tapped}");

        if model.selected_index() == Some(tapped) {
            return None;
        }
        Some(GestureStep::new(Transition::EnterBounds).with(VisualCommand::SetFaded {
            index: tapped,
            faded: true,
        }))
    }

    fn touch_up(&mut self, location: Point, model: &impl SelectionModel) -> Option<GestureStep> {
        let state = self.state;
        let focused = self.focused_index;
        let dragged_off = self.dragged_off_original_segment;
        *self = Self::default();

        let tapped = model.segment_index_for_point(location)?;
        let selected = model.selected_index();

        match state {
            TrackingState::Idle => None,
            TrackingState::TrackingSegment => {
                let mut step = GestureStep::new(Transition::CommitSegment)
                    .with(VisualCommand::ShowSelection);
                if model.is_segment_disabled(tapped) {
                    trace!("Touch up on disabled segment {tapped}, gesture discarded");
                    return Some(step);
                }
                if selected != Some(tapped) {
                    step.commit = Some(Commit::Select(tapped));
                }
                Some(step)
            }
            TrackingState::TrackingThumb => {
                // Drags never carry the thumb onto a disabled segment.
                let target = if model.is_segment_disabled(tapped) {
                    focused.or(selected)?
                } else {
                    tapped
                };

                let commit = if selected != Some(target) {
                    Some(Commit::Select(target))
                } else if model.is_segment_reversible(target) && !dragged_off {
                    Some(Commit::ToggleReversed(target))
                } else {
                    None
                };

                let mut step = GestureStep::new(Transition::CommitThumb);
                // A release away from the last drag point still has to carry
                // the thumb over.
                if let Some(from) = focused.or(selected).filter(|&from| from != target) {
                    step = step.with(VisualCommand::MoveThumb { from, to: target });
                }
                step = step
                    .with(VisualCommand::SetPressed {
                        index: target,
                        pressed: false,
                    })
                    .with(VisualCommand::SyncDirection { index: target });
                step.commit = commit;
                Some(step)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Model {
        count: usize,
        width: f32,
        selected: Option<usize>,
        disabled: Vec<usize>,
        reversible: Vec<usize>,
        enabled: bool,
    }

    impl Model {
        fn new(count: usize, selected: Option<usize>) -> Self {
            Self {
                count,
                width: 300.0,
                selected,
                disabled: Vec::new(),
                reversible: Vec::new(),
                enabled: true,
            }
        }

        fn center_of(&self, index: usize) -> Point {
            let width = self.width / self.count as f32;
            Point::new(width * index as f32 + width * 0.5, 16.0)
        }
    }

    impl SelectionModel for Model {
        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn segment_index_for_point(&self, point: Point) -> Option<usize> {
            if self.count == 0 {
                return None;
            }
            let width = (self.width / self.count as f32).floor();
            Some((point.x / width).floor().clamp(0.0, (self.count - 1) as f32) as usize)
        }

        fn is_segment_disabled(&self, index: usize) -> bool {
            self.disabled.contains(&index)
        }

        fn is_segment_reversible(&self, index: usize) -> bool {
            self.reversible.contains(&index)
        }

        fn selected_index(&self) -> Option<usize> {
            self.selected
        }
    }

    fn commits(tracker: &mut SelectionTracker, model: &Model, events: &[TouchEvent]) -> Vec<Commit> {
        events
            .iter()
            .filter_map(|event| tracker.handle(event, model))
            .filter_map(|step| step.commit)
            .collect()
    }

    #[test]
    fn test_tap_on_unselected_segment_commits_once() {
        let model = Model::new(3, Some(0));
        let mut tracker = SelectionTracker::new();

        let down = tracker
            .handle(&TouchEvent::down(model.center_of(2)), &model)
            .expect("down is tracked");
        assert_eq!(down.transition, Transition::PressSegment);
        assert_eq!(tracker.state(), TrackingState::TrackingSegment);
        assert_eq!(tracker.focused_index(), Some(2));

        let up = tracker
            .handle(&TouchEvent::up(model.center_of(2)), &model)
            .expect("up is tracked");
        assert_eq!(up.commit, Some(Commit::Select(2)));
        assert_eq!(up.transition, Transition::CommitSegment);
        assert_eq!(up.commands.as_slice(), &[VisualCommand::ShowSelection]);
        assert_eq!(tracker.state(), TrackingState::Idle);
        assert_eq!(tracker.focused_index(), None);
    }

    #[test]
    fn test_drag_across_segments_previews_then_commits_release_point() {
        let model = Model::new(3, None);
        let mut tracker = SelectionTracker::new();

        tracker.handle(&TouchEvent::down(model.center_of(2)), &model);
        let drag = tracker
            .handle(&TouchEvent::drag(model.center_of(0)), &model)
            .expect("focus moved");
        assert_eq!(drag.transition, Transition::FocusSegment);
        assert_eq!(
            drag.commands.as_slice(),
            &[
                VisualCommand::SetFaded {
                    index: 2,
                    faded: false
                },
                VisualCommand::SetFaded {
                    index: 0,
                    faded: true
                },
            ]
        );
        assert!(tracker.dragged_off_original_segment());

        let up = tracker.handle(&TouchEvent::up(model.center_of(0)), &model);
        assert_eq!(up.and_then(|step| step.commit), Some(Commit::Select(0)));
        assert_eq!(tracker.focused_index(), None);
    }

    #[test]
    fn test_drag_within_focused_segment_is_ignored() {
        let model = Model::new(3, None);
        let mut tracker = SelectionTracker::new();
        tracker.handle(&TouchEvent::down(Point::new(110.0, 10.0)), &model);
        assert!(
            tracker
                .handle(&TouchEvent::drag(Point::new(180.0, 10.0)), &model)
                .is_none()
        );
        assert!(!tracker.dragged_off_original_segment());
    }

    #[test]
    fn test_selected_segment_is_never_faded_by_drag() {
        let model = Model::new(3, Some(1));
        let mut tracker = SelectionTracker::new();
        tracker.handle(&TouchEvent::down(model.center_of(0)), &model);
        let drag = tracker
            .handle(&TouchEvent::drag(model.center_of(1)), &model)
            .expect("focus moved");
        assert_eq!(
            drag.commands.as_slice(),
            &[VisualCommand::SetFaded {
                index: 0,
                faded: false
            }]
        );
    }

    #[test]
    fn test_tap_on_reversible_selected_segment_toggles() {
        let mut model = Model::new(3, Some(1));
        model.reversible.push(1);
        let mut tracker = SelectionTracker::new();

        let down = tracker
            .handle(&TouchEvent::down(model.center_of(1)), &model)
            .expect("thumb pressed");
        assert_eq!(down.transition, Transition::PressThumb);
        assert!(tracker.is_dragging_thumb());

        let up = tracker
            .handle(&TouchEvent::up(model.center_of(1)), &model)
            .expect("thumb released");
        assert_eq!(up.commit, Some(Commit::ToggleReversed(1)));
        assert_eq!(up.transition, Transition::CommitThumb);
    }

    #[test]
    fn test_tap_on_plain_selected_segment_changes_nothing() {
        let model = Model::new(3, Some(1));
        let mut tracker = SelectionTracker::new();
        let events = [
            TouchEvent::down(model.center_of(1)),
            TouchEvent::up(model.center_of(1)),
        ];
        assert!(commits(&mut tracker, &model, &events).is_empty());
    }

    #[test]
    fn test_thumb_drag_away_and_back_does_not_toggle() {
        let mut model = Model::new(3, Some(1));
        model.reversible.push(1);
        let mut tracker = SelectionTracker::new();
        let events = [
            TouchEvent::down(model.center_of(1)),
            TouchEvent::drag(model.center_of(2)),
            TouchEvent::drag(model.center_of(1)),
            TouchEvent::up(model.center_of(1)),
        ];
        assert!(commits(&mut tracker, &model, &events).is_empty());
    }

    #[test]
    fn test_thumb_drag_moves_thumb_and_commits() {
        let model = Model::new(3, Some(0));
        let mut tracker = SelectionTracker::new();
        tracker.handle(&TouchEvent::down(model.center_of(0)), &model);
        let drag = tracker
            .handle(&TouchEvent::drag(model.center_of(2)), &model)
            .expect("thumb moved");
        assert_eq!(drag.transition, Transition::DragThumb);
        assert_eq!(
            drag.commands.as_slice(),
            &[VisualCommand::MoveThumb { from: 0, to: 2 }]
        );

        let up = tracker
            .handle(&TouchEvent::up(model.center_of(2)), &model)
            .expect("released");
        assert_eq!(up.commit, Some(Commit::Select(2)));
        assert_eq!(
            up.commands.as_slice(),
            &[
                VisualCommand::SetPressed {
                    index: 2,
                    pressed: false
                },
                VisualCommand::SyncDirection { index: 2 },
            ]
        );
    }

    #[test]
    fn test_thumb_release_away_from_focus_moves_thumb() {
        let model = Model::new(3, Some(0));
        let mut tracker = SelectionTracker::new();
        tracker.handle(&TouchEvent::down(model.center_of(0)), &model);

        let up = tracker
            .handle(
                &TouchEvent::new(TouchPhase::UpOutside, model.center_of(2)),
                &model,
            )
            .expect("released");
        assert_eq!(up.commit, Some(Commit::Select(2)));
        assert_eq!(
            up.commands.as_slice(),
            &[
                VisualCommand::MoveThumb { from: 0, to: 2 },
                VisualCommand::SetPressed {
                    index: 2,
                    pressed: false
                },
                VisualCommand::SyncDirection { index: 2 },
            ]
        );
    }

    #[test]
    fn test_thumb_release_over_disabled_segment_keeps_last_focus() {
        let mut model = Model::new(3, Some(0));
        model.disabled.push(2);
        let mut tracker = SelectionTracker::new();
        let events = [
            TouchEvent::down(model.center_of(0)),
            TouchEvent::drag(model.center_of(1)),
            TouchEvent::drag(model.center_of(2)),
            TouchEvent::up(model.center_of(2)),
        ];
        assert_eq!(
            commits(&mut tracker, &model, &events),
            vec![Commit::Select(1)]
        );
    }

    #[test]
    fn test_disabled_segment_ignores_gesture() {
        let mut model = Model::new(3, Some(0));
        model.disabled.push(1);
        let mut tracker = SelectionTracker::new();
        assert!(
            tracker
                .handle(&TouchEvent::down(model.center_of(1)), &model)
                .is_none()
        );
        assert_eq!(tracker.state(), TrackingState::Idle);
        assert!(
            tracker
                .handle(&TouchEvent::up(model.center_of(1)), &model)
                .is_none()
        );
    }

    #[test]
    fn test_release_on_disabled_segment_discards_preview() {
        let mut model = Model::new(3, Some(0));
        model.disabled.push(2);
        let mut tracker = SelectionTracker::new();
        tracker.handle(&TouchEvent::down(model.center_of(1)), &model);
        let up = tracker
            .handle(&TouchEvent::up(model.center_of(2)), &model)
            .expect("visuals restored");
        assert_eq!(up.commit, None);
        assert_eq!(up.commands.as_slice(), &[VisualCommand::ShowSelection]);
    }

    #[test]
    fn test_disabled_control_is_inert() {
        let mut model = Model::new(3, Some(0));
        model.enabled = false;
        let mut tracker = SelectionTracker::new();
        assert!(
            tracker
                .handle(&TouchEvent::down(model.center_of(1)), &model)
                .is_none()
        );
        assert_eq!(tracker.state(), TrackingState::Idle);
    }

    #[test]
    fn test_exit_and_reenter_bounds() {
        let model = Model::new(3, None);
        let mut tracker = SelectionTracker::new();
        tracker.handle(&TouchEvent::down(model.center_of(1)), &model);

        let exit = tracker
            .handle(
                &TouchEvent::new(TouchPhase::DragExit, Point::new(150.0, 80.0)),
                &model,
            )
            .expect("focus cleared");
        assert_eq!(exit.transition, Transition::ExitBounds);
        assert_eq!(tracker.focused_index(), None);

        // Dragging outside without focus changes nothing.
        assert!(
            tracker
                .handle(
                    &TouchEvent::new(TouchPhase::DragOutside, Point::new(250.0, 80.0)),
                    &model,
                )
                .is_none()
        );
        assert!(tracker.dragged_off_original_segment());

        let enter = tracker
            .handle(
                &TouchEvent::new(TouchPhase::DragEnter, model.center_of(2)),
                &model,
            )
            .expect("focus restored");
        assert_eq!(enter.transition, Transition::EnterBounds);
        assert_eq!(tracker.focused_index(), Some(2));
    }

    #[test]
    fn test_thumb_tracking_ignores_bounds_crossings() {
        let model = Model::new(3, Some(0));
        let mut tracker = SelectionTracker::new();
        tracker.handle(&TouchEvent::down(model.center_of(0)), &model);
        assert!(
            tracker
                .handle(
                    &TouchEvent::new(TouchPhase::DragExit, Point::new(50.0, 80.0)),
                    &model,
                )
                .is_none()
        );
        assert_eq!(tracker.focused_index(), Some(0));
    }

    #[test]
    fn test_idle_tracker_ignores_everything_but_down() {
        let model = Model::new(3, Some(0));
        let mut tracker = SelectionTracker::new();
        for phase in [
            TouchPhase::DragInside,
            TouchPhase::DragExit,
            TouchPhase::DragEnter,
            TouchPhase::UpInside,
            TouchPhase::UpOutside,
        ] {
            assert!(
                tracker
                    .handle(&TouchEvent::new(phase, model.center_of(1)), &model)
                    .is_none()
            );
        }
    }

    #[test]
    fn test_no_segments_is_inert() {
        let model = Model::new(0, None);
        let mut tracker = SelectionTracker::new();
        assert!(
            tracker
                .handle(&TouchEvent::down(Point::new(10.0, 10.0)), &model)
                .is_none()
        );
    }
}
