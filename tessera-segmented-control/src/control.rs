//! The segmented control facade.
//!
//! ## Usage
//!
//! Own one [`SegmentedControl`] per on-screen control. Mutate it through its
//! methods, forward touches with [`SegmentedControl::handle_touch`], advance
//! its clock every frame and draw the [`ControlSnapshot`] it produces.
//!
//! Mutations only mark the layout dirty; the next
//! [`SegmentedControl::layout_if_needed`] or
//! [`SegmentedControl::snapshot`] reconciles the visuals.
//!
//! ```
//! use tessera_segmented_control::{SegmentedControl, TouchEvent};
//!
//! let mut control = SegmentedControl::with_items(["Day", "Week", "Month"]);
//! assert_eq!(control.selected_index(), Some(0));
//!
//! control.handle_touch(TouchEvent::down([250.0, 16.0]));
//! let change = control.handle_touch(TouchEvent::up([250.0, 16.0]));
//! assert_eq!(change.map(|change| change.index), Some(2));
//! ```

use std::{fmt, sync::Arc, time::Duration};

use tracing::debug;

use crate::{
    animation::{Animated, AnimationSpec},
    color::Appearance,
    geometry::SegmentGeometry,
    gesture::{
        Commit, SelectionModel, SelectionTracker, TouchEvent, TrackingState, VisualCommand,
    },
    glyph::{GlyphData, GlyphKey, GlyphTable},
    rect::{Point, Rect, Size},
    segment::{ContentMeasurer, EstimatedMetrics, ImageData, Segment, SegmentContent},
    theme::{ResolvedStyle, SegmentedControlDefaults, SegmentedControlStyle},
    visual::{ControlSnapshot, Motion, SeparatorVisual, ThumbVisual, TrackSnapshot},
};

/// Payload of a change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionChange {
    /// The selected segment after the change.
    pub index: usize,
    /// Whether that segment is reversed after the change.
    pub reversed: bool,
}

/// Callback invoked with every [`SelectionChange`].
pub type ChangeHandler = Arc<dyn Fn(SelectionChange) + Send + Sync>;

/// A row of text or image segments with a sliding selection thumb.
pub struct SegmentedControl {
    segments: Vec<Segment>,
    selected_index: Option<usize>,
    enabled: bool,
    tracker: SelectionTracker,
    style: SegmentedControlStyle,
    appearance: Appearance,
    bounds: Animated<Size>,
    measurer: Arc<dyn ContentMeasurer>,
    thumb: ThumbVisual,
    separators: Vec<SeparatorVisual>,
    arrow_glyph: Option<Arc<GlyphData>>,
    separator_glyph: Option<Arc<GlyphData>>,
    on_change: Option<ChangeHandler>,
    clock: Duration,
    needs_layout: bool,
}

impl fmt::Debug for SegmentedControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentedControl")
            .field("segments", &self.segments)
            .field("selected_index", &self.selected_index)
            .field("enabled", &self.enabled)
            .field("tracker", &self.tracker)
            .field("appearance", &self.appearance)
            .field("bounds", &self.bounds.target())
            .field("clock", &self.clock)
            .field("needs_layout", &self.needs_layout)
            .finish_non_exhaustive()
    }
}

impl Default for SegmentedControl {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the control handed to the state machine.
struct ControlModel<'a> {
    segments: &'a [Segment],
    selected_index: Option<usize>,
    enabled: bool,
    geometry: SegmentGeometry,
}

impl SelectionModel for ControlModel<'_> {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn segment_index_for_point(&self, point: Point) -> Option<usize> {
        self.geometry.segment_index_for_point(point)
    }

    fn is_segment_disabled(&self, index: usize) -> bool {
        self.segments.get(index).is_none_or(Segment::is_disabled)
    }

    fn is_segment_reversible(&self, index: usize) -> bool {
        self.segments.get(index).is_some_and(Segment::is_reversible)
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }
}

impl SegmentedControl {
    /// An empty control of the default size.
    pub fn new() -> Self {
        let glyphs = GlyphTable::shared();
        Self {
            segments: Vec::new(),
            selected_index: None,
            enabled: true,
            tracker: SelectionTracker::new(),
            style: SegmentedControlStyle::default(),
            appearance: Appearance::default(),
            bounds: Animated::new(Size::new(
                SegmentedControlDefaults::WIDTH,
                SegmentedControlDefaults::HEIGHT,
            )),
            measurer: Arc::new(EstimatedMetrics),
            thumb: ThumbVisual::default(),
            separators: Vec::new(),
            arrow_glyph: glyphs.get(GlyphKey::DirectionArrow),
            separator_glyph: glyphs.get(GlyphKey::Separator),
            on_change: None,
            clock: Duration::ZERO,
            needs_layout: true,
        }
    }

    /// A control showing `items`, with the first one selected.
    pub fn with_items<I, C>(items: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<SegmentContent>,
    {
        let mut control = Self::new();
        control.set_items(items);
        control
    }

    // Segments

    /// Replaces every segment with `items`, none of them reversible.
    ///
    /// Selects the first segment and notifies whenever the list is non-empty,
    /// even if segment 0 was already selected.
    pub fn set_items<I, C>(&mut self, items: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<SegmentContent>,
    {
        self.remove_all_segments();
        self.segments = items
            .into_iter()
            .map(|content| Segment::new(content.into(), false))
            .collect();
        self.segments_changed();

        if !self.segments.is_empty() {
            self.selected_index = Some(0);
            self.notify(self.current_change(0));
        }
    }

    /// Contents of every segment, in display order.
    pub fn items(&self) -> impl Iterator<Item = &SegmentContent> {
        self.segments.iter().map(Segment::content)
    }

    /// Adds a segment at the end.
    pub fn append_segment(&mut self, content: impl Into<SegmentContent>, reversible: bool) {
        self.insert_segment(content, reversible, self.segments.len());
    }

    /// Inserts a segment at `index`, which may equal the segment count.
    ///
    /// The selected index keeps its numeric value, so it now points at
    /// whichever segment occupies that slot.
    pub fn insert_segment(
        &mut self,
        content: impl Into<SegmentContent>,
        reversible: bool,
        index: usize,
    ) {
        if index > self.segments.len() {
            debug!("Ignoring insert at {index} into {} segments", self.segments.len());
            return;
        }
        self.segments
            .insert(index, Segment::new(content.into(), reversible));
        self.segments_changed();
    }

    /// Replaces the content and reversible flag of the segment at `index`.
    pub fn set_segment(
        &mut self,
        content: impl Into<SegmentContent>,
        reversible: bool,
        index: usize,
    ) {
        let Some(segment) = self.segments.get_mut(index) else {
            return;
        };
        segment.set_content(content.into());
        segment.set_reversible(reversible);
        segment.visual.set_reversible(reversible);
        self.needs_layout = true;
    }

    /// Removes the segment at `index`.
    ///
    /// A selection past the new end moves to the last segment, or to the
    /// nearest enabled one if that is disabled, without a notification.
    pub fn remove_segment(&mut self, index: usize) {
        if index >= self.segments.len() {
            return;
        }
        self.segments.remove(index);
        self.selected_index = match (self.selected_index, self.segments.len().checked_sub(1)) {
            (Some(selected), Some(last)) => self.nearest_enabled(selected.min(last)),
            _ => None,
        };
        self.segments_changed();
    }

    /// Removes the last segment, if any.
    pub fn remove_last_segment(&mut self) {
        if let Some(last) = self.segments.len().checked_sub(1) {
            self.remove_segment(last);
        }
    }

    /// Removes every segment and clears the selection without notifying.
    pub fn remove_all_segments(&mut self) {
        self.segments.clear();
        self.selected_index = None;
        self.segments_changed();
    }

    /// Number of segments.
    pub fn number_of_segments(&self) -> usize {
        self.segments.len()
    }

    /// Number of separators between segments.
    pub fn separator_count(&self) -> usize {
        self.separators.len()
    }

    /// The segment at `index`.
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Content of the segment at `index`.
    pub fn content_for_segment(&self, index: usize) -> Option<&SegmentContent> {
        self.segments.get(index).map(Segment::content)
    }

    /// Title of the segment at `index`, if it shows text.
    pub fn title_for_segment(&self, index: usize) -> Option<&str> {
        self.content_for_segment(index)
            .and_then(SegmentContent::title)
    }

    /// Image of the segment at `index`, if it shows an image.
    pub fn image_for_segment(&self, index: usize) -> Option<&Arc<ImageData>> {
        self.content_for_segment(index)
            .and_then(SegmentContent::image)
    }

    // Per-segment flags

    /// Enables or disables the segment at `index`.
    ///
    /// Disabling the selected segment moves the selection to the nearest
    /// enabled segment after it, else before it, else clears it. The move
    /// does not notify.
    pub fn set_segment_enabled(&mut self, index: usize, enabled: bool) {
        let Some(segment) = self.segments.get_mut(index) else {
            return;
        };
        segment.set_disabled(!enabled);
        self.needs_layout = true;

        let Some(selected) = self.selected_index else {
            return;
        };
        if !self.segments[selected].is_disabled() {
            return;
        }

        self.selected_index = self.nearest_enabled(selected);
        debug!(
            "Segment {selected} disabled, selection moved to {:?}",
            self.selected_index
        );
        self.reset_gesture();
    }

    /// `index` if enabled, else the first enabled segment after it, else the
    /// last one before it.
    fn nearest_enabled(&self, index: usize) -> Option<usize> {
        let enabled = |i: &usize| !self.segments[*i].is_disabled();
        (index..self.segments.len())
            .find(enabled)
            .or_else(|| (0..index).rev().find(enabled))
    }

    /// Whether the segment at `index` accepts touches; `false` when out of
    /// range.
    pub fn is_segment_enabled(&self, index: usize) -> bool {
        self.segments
            .get(index)
            .is_some_and(|segment| !segment.is_disabled())
    }

    /// Makes the segment at `index` reversible or not. Clearing the flag
    /// also clears its reversed state.
    pub fn set_segment_reversible(&mut self, index: usize, reversible: bool) {
        let Some(segment) = self.segments.get_mut(index) else {
            return;
        };
        segment.set_reversible(reversible);
        segment.visual.set_reversible(reversible);
        self.needs_layout = true;
    }

    /// Whether the segment at `index` is reversible; `false` when out of
    /// range.
    pub fn is_segment_reversible(&self, index: usize) -> bool {
        self.segments
            .get(index)
            .is_some_and(Segment::is_reversible)
    }

    /// Sets the direction of the segment at `index`. Ignored unless the
    /// segment is reversible.
    pub fn set_segment_reversed(&mut self, index: usize, reversed: bool) {
        let Some(segment) = self.segments.get_mut(index) else {
            return;
        };
        if segment.set_reversed(reversed) {
            self.needs_layout = true;
        } else {
            debug!("Segment {index} is not reversible");
        }
    }

    /// Whether the segment at `index` is reversed; `false` when out of range.
    pub fn is_segment_reversed(&self, index: usize) -> bool {
        self.segments.get(index).is_some_and(Segment::is_reversed)
    }

    /// Indexes of every reversible segment, ascending.
    pub fn reversible_segment_indexes(&self) -> Vec<usize> {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, segment)| segment.is_reversible())
            .map(|(index, _)| index)
            .collect()
    }

    /// Makes exactly the segments at `indexes` reversible. Out of range
    /// indexes are ignored.
    pub fn set_reversible_segment_indexes(&mut self, indexes: &[usize]) {
        for index in 0..self.segments.len() {
            self.set_segment_reversible(index, indexes.contains(&index));
        }
    }

    // Selection

    /// The selected segment, `None` when nothing is selected.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Selects the segment at `index`, clamped to the last segment.
    ///
    /// Re-selecting the current segment does nothing. Disabled segments
    /// cannot be selected. Selecting a segment notifies; clearing the
    /// selection does not.
    pub fn set_selected_index(&mut self, index: Option<usize>) {
        let index = index.and_then(|index| {
            self.segments
                .len()
                .checked_sub(1)
                .map(|last| index.min(last))
        });
        if index == self.selected_index {
            return;
        }
        if let Some(index) = index {
            if self.segments[index].is_disabled() {
                debug!("Segment {index} is disabled and cannot be selected");
                return;
            }
        }

        self.reset_gesture();
        self.selected_index = index;
        self.needs_layout = true;
        if let Some(index) = index {
            self.notify(self.current_change(index));
        }
    }

    /// Whether the selected segment is reversed; `false` when nothing is
    /// selected or the segment is not reversible.
    pub fn selected_segment_reversed(&self) -> bool {
        self.selected_index
            .is_some_and(|index| self.is_segment_reversed(index))
    }

    /// Sets the direction of the selected segment, if it is reversible.
    pub fn set_selected_segment_reversed(&mut self, reversed: bool) {
        if let Some(index) = self.selected_index {
            self.set_segment_reversed(index, reversed);
        }
    }

    /// Registers the callback fired on every committed change.
    pub fn set_on_change(&mut self, handler: impl Fn(SelectionChange) + Send + Sync + 'static) {
        self.on_change = Some(Arc::new(handler));
    }

    /// Removes the change callback.
    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    // Control-wide state

    /// Whether the control accepts interaction.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the whole control. A disabled control ignores
    /// touches, hides its thumb and dims every item.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        if !enabled {
            self.reset_gesture();
        }
        self.enabled = enabled;
        self.needs_layout = true;
    }

    /// Cosmetic overrides.
    pub fn style(&self) -> &SegmentedControlStyle {
        &self.style
    }

    /// Replaces the cosmetic overrides.
    pub fn set_style(&mut self, style: SegmentedControlStyle) {
        self.style = style;
        self.needs_layout = true;
    }

    /// The host appearance default colours follow.
    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    /// Switches default colours to `appearance`; explicit overrides stay.
    pub fn set_appearance(&mut self, appearance: Appearance) {
        self.appearance = appearance;
    }

    /// Replaces the content measurer used during layout.
    pub fn set_measurer(&mut self, measurer: impl ContentMeasurer + 'static) {
        self.measurer = Arc::new(measurer);
        self.needs_layout = true;
    }

    /// Size of the control.
    pub fn bounds(&self) -> Size {
        self.bounds.target()
    }

    /// Resizes the control immediately.
    pub fn set_bounds(&mut self, bounds: Size) {
        self.bounds.set(bounds);
        self.needs_layout = true;
    }

    /// Resizes the control with an animation. Every frame, including the
    /// thumb's shadow path, follows with the same timing.
    pub fn set_bounds_animated(&mut self, bounds: Size, spec: AnimationSpec) {
        self.bounds.animate_to(bounds, &spec, self.clock);
        self.needs_layout = true;
    }

    /// Style with every default filled in for the current appearance.
    pub fn resolved_style(&self) -> ResolvedStyle {
        self.style.resolve(self.appearance)
    }

    /// Layout math for the current size and segment count.
    pub fn geometry(&self) -> SegmentGeometry {
        let style = self.resolved_style();
        SegmentGeometry::new(
            self.bounds.target(),
            self.segments.len(),
            style.thumb_inset,
            style.corner_radius,
        )
    }

    // Interaction

    /// Current gesture state.
    pub fn tracking_state(&self) -> TrackingState {
        self.tracker.state()
    }

    /// Segment under the finger during a gesture.
    pub fn focused_index(&self) -> Option<usize> {
        self.tracker.focused_index()
    }

    /// Feeds one touch event through the control.
    ///
    /// Returns the change it committed, which has also been sent to the
    /// change callback.
    pub fn handle_touch(&mut self, event: TouchEvent) -> Option<SelectionChange> {
        self.layout_if_needed();

        let model = ControlModel {
            segments: &self.segments,
            selected_index: self.selected_index,
            enabled: self.enabled,
            geometry: self.geometry(),
        };
        let step = self.tracker.handle(&event, &model)?;

        let change = step.commit.map(|commit| self.apply_commit(commit));
        if let Some(change) = change {
            self.notify(change);
        }

        let motion = Motion::animated(step.transition.spec(), self.clock);
        for command in step.commands {
            self.apply_command(command, motion);
        }
        change
    }

    fn apply_commit(&mut self, commit: Commit) -> SelectionChange {
        let index = match commit {
            Commit::Select(index) => {
                self.selected_index = Some(index);
                index
            }
            Commit::ToggleReversed(index) => {
                self.segments[index].toggle_direction();
                index
            }
        };
        self.current_change(index)
    }

    fn apply_command(&mut self, command: VisualCommand, motion: Motion) {
        let arrow_size = self.arrow_size();
        match command {
            VisualCommand::SetFaded { index, faded } => {
                if let Some(segment) = self.segments.get_mut(index) {
                    segment.visual.set_faded(faded, motion);
                }
            }
            VisualCommand::SetPressed { index, pressed } => {
                self.thumb.set_pressed(pressed, motion);
                if let Some(segment) = self.segments.get_mut(index) {
                    segment.visual.set_pressed(pressed, arrow_size, motion);
                }
            }
            VisualCommand::MoveThumb { from, to } => {
                let frame = self.geometry().frame_for_segment(to);
                self.thumb.set_frame(frame, motion, motion);
                if let Some(segment) = self.segments.get_mut(from) {
                    let reversed = segment.is_reversed();
                    segment.visual.set_selected(false, reversed, arrow_size, motion);
                    segment.visual.set_pressed(false, arrow_size, motion);
                }
                if let Some(segment) = self.segments.get_mut(to) {
                    let reversed = segment.is_reversed();
                    segment.visual.set_selected(true, reversed, arrow_size, motion);
                    segment.visual.set_pressed(true, arrow_size, motion);
                }
                self.refresh_separators(Some(to), motion);
            }
            VisualCommand::ShowSelection => self.show_selection(motion),
            VisualCommand::SyncDirection { index } => {
                if let Some(segment) = self.segments.get_mut(index) {
                    let reversed = segment.is_reversed();
                    segment.visual.set_reversed(reversed);
                }
            }
        }
    }

    /// Restores every item, the thumb and the separators to the committed
    /// selection.
    fn show_selection(&mut self, motion: Motion) {
        let arrow_size = self.arrow_size();
        let selected = self.selected_index;
        for (index, segment) in self.segments.iter_mut().enumerate() {
            let reversed = segment.is_reversed();
            segment.visual.set_faded(false, motion);
            segment
                .visual
                .set_selected(selected == Some(index), reversed, arrow_size, motion);
        }
        self.layout_thumb(motion, motion);
        self.refresh_separators(selected, motion);
    }

    /// Drops any gesture in progress and its transient visuals.
    fn reset_gesture(&mut self) {
        if self.tracker.state() == TrackingState::Idle {
            return;
        }
        self.tracker.cancel();
        let motion = Motion::immediate(self.clock);
        let arrow_size = self.arrow_size();
        self.thumb.set_pressed(false, motion);
        for segment in &mut self.segments {
            segment.visual.set_faded(false, motion);
            segment.visual.set_pressed(false, arrow_size, motion);
        }
    }

    fn current_change(&self, index: usize) -> SelectionChange {
        SelectionChange {
            index,
            reversed: self.is_segment_reversed(index),
        }
    }

    fn notify(&self, change: SelectionChange) {
        debug!(
            "Selection changed to segment {} (reversed: {})",
            change.index, change.reversed
        );
        if let Some(handler) = &self.on_change {
            handler(change);
        }
    }

    // Layout

    /// Whether a mutation is waiting for the next layout pass.
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Reconciles every visual element with the model if anything changed
    /// since the last pass.
    pub fn layout_if_needed(&mut self) {
        if !self.needs_layout {
            return;
        }
        self.needs_layout = false;

        let motion = match self.bounds.running_spec(self.clock) {
            Some(spec) => Motion::animated(spec, self.clock),
            None => Motion::immediate(self.clock),
        };
        self.layout_thumb(motion, motion);
        self.layout_items(motion);
        self.layout_separators(motion);
    }

    /// The segment the thumb sits on: the drag target while the thumb is
    /// being dragged, else the selection.
    fn displayed_index(&self) -> Option<usize> {
        match self.tracker.state() {
            TrackingState::TrackingThumb => self
                .tracker
                .focused_index()
                .filter(|&index| self.is_segment_enabled(index))
                .or(self.selected_index),
            _ => self.selected_index,
        }
    }

    fn layout_thumb(&mut self, motion: Motion, shadow_motion: Motion) {
        match self.displayed_index() {
            Some(index) if self.enabled => {
                let frame = self.geometry().frame_for_segment(index);
                self.thumb.set_frame(frame, motion, shadow_motion);
            }
            _ => self.thumb.hide(),
        }
    }

    fn layout_items(&mut self, motion: Motion) {
        let geometry = self.geometry();
        let style = self.resolved_style();
        let arrow_size = self.arrow_size();
        let selected = self.displayed_index();
        let enabled = self.enabled;

        for (index, segment) in self.segments.iter_mut().enumerate() {
            let is_selected = selected == Some(index);
            let font = if is_selected {
                style.selected_text_font
            } else {
                style.text_font
            };
            let natural_size = self.measurer.measure(segment.content(), &font);
            let arrow_width = segment.is_reversible().then_some(arrow_size.width);
            let frame = geometry.frame_for_item(index, natural_size, arrow_width);

            let reversed = segment.is_reversed();
            let dimmed = !enabled || segment.is_disabled();
            segment.visual.set_frame(frame, arrow_size, motion);
            segment
                .visual
                .set_selected(is_selected, reversed, arrow_size, motion);
            segment.visual.set_dimmed(dimmed, motion);
        }
    }

    fn layout_separators(&mut self, motion: Motion) {
        let geometry = self.geometry();
        for (index, separator) in self.separators.iter_mut().enumerate() {
            separator.set_frame(geometry.frame_for_separator(index), motion);
        }
        self.refresh_separators(self.displayed_index(), Motion::immediate(self.clock));
    }

    /// Hides the separators either side of `selected`; a disabled control
    /// shows them all.
    fn refresh_separators(&mut self, selected: Option<usize>, motion: Motion) {
        let enabled = self.enabled;
        for (index, separator) in self.separators.iter_mut().enumerate() {
            let beside_selected = selected
                .is_some_and(|selected| index == selected || index + 1 == selected);
            separator.set_visible(!enabled || !beside_selected, motion);
        }
    }

    /// Re-derives the separator count after a structural change.
    fn segments_changed(&mut self) {
        self.reset_gesture();
        let count = self.segments.len().saturating_sub(1);
        self.separators.resize_with(count, SeparatorVisual::default);
        self.needs_layout = true;
    }

    fn arrow_size(&self) -> Size {
        self.arrow_glyph
            .as_ref()
            .map_or(Size::ZERO, |glyph| glyph.size)
    }

    // Animation

    /// Time on the control's animation clock.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Advances every running animation by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.clock += dt;
        let now = self.clock;
        self.bounds.settle(now);
        self.thumb.settle(now);
        for separator in &mut self.separators {
            separator.settle(now);
        }
        for segment in &mut self.segments {
            segment.visual.settle(now);
        }
    }

    /// Whether another frame is needed to finish running animations.
    pub fn is_animating(&self) -> bool {
        let now = self.clock;
        self.bounds.is_animating(now)
            || self.thumb.is_animating(now)
            || self
                .separators
                .iter()
                .any(|separator| separator.is_animating(now))
            || self
                .segments
                .iter()
                .any(|segment| segment.visual.is_animating(now))
    }

    /// Lays out if needed and samples every element at the current time.
    pub fn snapshot(&mut self) -> ControlSnapshot {
        self.layout_if_needed();

        let now = self.clock;
        let style = self.resolved_style();
        let colors = style.colors;
        ControlSnapshot {
            track: TrackSnapshot {
                frame: Rect::from_size(self.bounds.value_at(now)),
                corner_radius: style.corner_radius,
                color: colors.background,
            },
            thumb: self.thumb.snapshot(
                colors.thumb,
                style.thumb_corner_radius(),
                style.thumb_shadow,
                style.thumb_shadow_corner_radius(),
                now,
            ),
            separators: self
                .separators
                .iter()
                .map(|separator| {
                    separator.snapshot(colors.separator, self.separator_glyph.as_ref(), now)
                })
                .collect(),
            items: self
                .segments
                .iter()
                .map(|segment| {
                    let (font, color) = if segment.visual.is_selected() {
                        (style.selected_text_font, colors.selected_item)
                    } else {
                        (style.text_font, colors.item)
                    };
                    segment.visual.snapshot(
                        segment.content(),
                        font,
                        color,
                        self.arrow_glyph.as_ref(),
                        now,
                    )
                })
                .collect(),
        }
    }
}
