//! Visual element state and the snapshots handed to the host renderer.
//!
//! Every element keeps its animatable properties as [`Animated`] values on the
//! control's clock. The control mutates them during layout and gesture
//! handling; the host only ever sees the sampled [`ControlSnapshot`].

use std::{f32::consts::PI, sync::Arc, time::Duration};

use crate::{
    animation::{Animated, AnimationSpec, Interpolate},
    color::Color,
    geometry::SegmentGeometry,
    glyph::GlyphData,
    rect::{Rect, ScaleTransform, Size},
    segment::SegmentContent,
    theme::{Font, SegmentedControlDefaults, Shadow},
};

/// How a property change is applied: animated with a spec, or immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Motion {
    pub(crate) spec: Option<AnimationSpec>,
    pub(crate) now: Duration,
}

impl Motion {
    pub(crate) fn immediate(now: Duration) -> Self {
        Self { spec: None, now }
    }

    pub(crate) fn animated(spec: AnimationSpec, now: Duration) -> Self {
        Self {
            spec: Some(spec),
            now,
        }
    }

    fn apply<T: Interpolate>(&self, value: &mut Animated<T>, target: T) {
        value.update(target, self.spec.as_ref(), self.now);
    }
}

#[derive(Debug, Clone)]
struct ArrowVisual {
    frame: Animated<Rect>,
    alpha: Animated<f32>,
    transform: Animated<ScaleTransform>,
    reversed: bool,
}

impl ArrowVisual {
    fn new() -> Self {
        Self {
            frame: Animated::new(Rect::ZERO),
            alpha: Animated::new(0.0),
            transform: Animated::new(ScaleTransform::IDENTITY),
            reversed: false,
        }
    }
}

/// The item view of one segment plus its optional direction arrow.
#[derive(Debug, Clone)]
pub(crate) struct SegmentVisual {
    frame: Animated<Rect>,
    alpha: Animated<f32>,
    scale: Animated<f32>,
    selected: bool,
    faded: bool,
    dimmed: bool,
    arrow: Option<ArrowVisual>,
}

impl SegmentVisual {
    pub(crate) fn new(reversible: bool) -> Self {
        Self {
            frame: Animated::new(Rect::ZERO),
            alpha: Animated::new(1.0),
            scale: Animated::new(1.0),
            selected: false,
            faded: false,
            dimmed: false,
            arrow: reversible.then(ArrowVisual::new),
        }
    }

    /// Creates or drops the arrow to match the segment's reversible flag.
    pub(crate) fn set_reversible(&mut self, reversible: bool) {
        match (reversible, self.arrow.is_some()) {
            (true, false) => self.arrow = Some(ArrowVisual::new()),
            (false, true) => self.arrow = None,
            _ => {}
        }
    }

    pub(crate) fn is_selected(&self) -> bool {
        self.selected
    }

    fn alpha_target(&self) -> f32 {
        if self.dimmed {
            SegmentedControlDefaults::DISABLED_ALPHA
        } else if self.faded {
            SegmentedControlDefaults::FADED_ITEM_ALPHA
        } else {
            1.0
        }
    }

    /// Places the item and, if present, re-anchors the arrow beside it.
    pub(crate) fn set_frame(&mut self, frame: Rect, arrow_size: Size, motion: Motion) {
        motion.apply(&mut self.frame, frame);
        if let Some(arrow) = &mut self.arrow {
            let arrow_frame = SegmentGeometry::frame_for_direction_arrow(frame, arrow_size);
            motion.apply(&mut arrow.frame, arrow_frame);
        }
    }

    /// Renders the item at the disabled alpha, or restores it.
    pub(crate) fn set_dimmed(&mut self, dimmed: bool, motion: Motion) {
        self.dimmed = dimmed;
        let alpha = self.alpha_target();
        motion.apply(&mut self.alpha, alpha);
    }

    pub(crate) fn set_faded(&mut self, faded: bool, motion: Motion) {
        self.faded = faded;
        let alpha = self.alpha_target();
        motion.apply(&mut self.alpha, alpha);
    }

    /// Switches between the selected and unselected styling. The arrow only
    /// shows on the selected item and faces the segment's direction.
    pub(crate) fn set_selected(
        &mut self,
        selected: bool,
        reversed: bool,
        arrow_size: Size,
        motion: Motion,
    ) {
        self.selected = selected;
        let item_frame = self.frame.target();
        if let Some(arrow) = &mut self.arrow {
            let alpha = if selected {
                SegmentedControlDefaults::DIRECTION_ARROW_ALPHA
            } else {
                0.0
            };
            motion.apply(&mut arrow.alpha, alpha);
            motion.apply(
                &mut arrow.frame,
                SegmentGeometry::frame_for_direction_arrow(item_frame, arrow_size),
            );
            arrow.reversed = reversed;
        }
    }

    /// Shrinks the item, and scales its arrow about the item's centre so
    /// the pair shrinks as one.
    pub(crate) fn set_pressed(&mut self, pressed: bool, arrow_size: Size, motion: Motion) {
        let scale = if pressed {
            SegmentedControlDefaults::PRESSED_SCALE
        } else {
            1.0
        };
        motion.apply(&mut self.scale, scale);

        let item_frame = self.frame.target();
        if let Some(arrow) = &mut self.arrow {
            let transform = if pressed {
                let arrow_frame = SegmentGeometry::frame_for_direction_arrow(item_frame, arrow_size);
                let mut offset = arrow_frame.center() - item_frame.center();
                offset.y = 0.0;
                ScaleTransform::scale_about(scale, offset)
            } else {
                ScaleTransform::IDENTITY
            };
            motion.apply(&mut arrow.transform, transform);
        }
    }

    pub(crate) fn set_reversed(&mut self, reversed: bool) {
        if let Some(arrow) = &mut self.arrow {
            arrow.reversed = reversed;
        }
    }

    pub(crate) fn is_animating(&self, now: Duration) -> bool {
        self.frame.is_animating(now)
            || self.alpha.is_animating(now)
            || self.scale.is_animating(now)
            || self.arrow.as_ref().is_some_and(|arrow| {
                arrow.frame.is_animating(now)
                    || arrow.alpha.is_animating(now)
                    || arrow.transform.is_animating(now)
            })
    }

    pub(crate) fn settle(&mut self, now: Duration) {
        self.frame.settle(now);
        self.alpha.settle(now);
        self.scale.settle(now);
        if let Some(arrow) = &mut self.arrow {
            arrow.frame.settle(now);
            arrow.alpha.settle(now);
            arrow.transform.settle(now);
        }
    }

    pub(crate) fn snapshot(
        &self,
        content: &SegmentContent,
        font: Font,
        color: Color,
        arrow_glyph: Option<&Arc<GlyphData>>,
        now: Duration,
    ) -> ItemSnapshot {
        ItemSnapshot {
            content: content.clone(),
            frame: self.frame.value_at(now),
            alpha: self.alpha.value_at(now),
            transform: ScaleTransform::scale(self.scale.value_at(now)),
            font,
            color,
            selected: self.selected,
            arrow: self.arrow.as_ref().map(|arrow| ArrowSnapshot {
                frame: arrow.frame.value_at(now),
                alpha: arrow.alpha.value_at(now),
                transform: arrow.transform.value_at(now),
                rotation: if arrow.reversed { PI } else { 0.0 },
                color,
                glyph: arrow_glyph.cloned(),
            }),
        }
    }
}

/// The sliding highlight behind the selected segment.
#[derive(Debug, Clone)]
pub(crate) struct ThumbVisual {
    frame: Animated<Rect>,
    scale: Animated<f32>,
    shadow_path: Animated<Rect>,
    hidden: bool,
}

impl Default for ThumbVisual {
    fn default() -> Self {
        Self {
            frame: Animated::new(Rect::ZERO),
            scale: Animated::new(1.0),
            shadow_path: Animated::new(Rect::ZERO),
            hidden: true,
        }
    }
}

impl ThumbVisual {
    pub(crate) fn hide(&mut self) {
        self.hidden = true;
    }

    /// Lays the thumb out over `frame`. The shadow path follows the new
    /// size with `shadow_motion`, which tracks any running bounds animation.
    pub(crate) fn set_frame(&mut self, frame: Rect, motion: Motion, shadow_motion: Motion) {
        let reveal = self.hidden;
        self.hidden = false;
        if reveal {
            // A hidden thumb appears in place instead of sliding in.
            self.frame.set(frame);
            self.shadow_path.set(SegmentGeometry::shadow_path_for_thumb(frame));
            return;
        }
        motion.apply(&mut self.frame, frame);
        shadow_motion.apply(
            &mut self.shadow_path,
            SegmentGeometry::shadow_path_for_thumb(frame),
        );
    }

    pub(crate) fn set_pressed(&mut self, pressed: bool, motion: Motion) {
        let scale = if pressed {
            SegmentedControlDefaults::PRESSED_SCALE
        } else {
            1.0
        };
        motion.apply(&mut self.scale, scale);
    }

    pub(crate) fn is_animating(&self, now: Duration) -> bool {
        self.frame.is_animating(now)
            || self.scale.is_animating(now)
            || self.shadow_path.is_animating(now)
    }

    pub(crate) fn settle(&mut self, now: Duration) {
        self.frame.settle(now);
        self.scale.settle(now);
        self.shadow_path.settle(now);
    }

    pub(crate) fn snapshot(
        &self,
        color: Color,
        corner_radius: f32,
        shadow: Shadow,
        shadow_corner_radius: f32,
        now: Duration,
    ) -> ThumbSnapshot {
        ThumbSnapshot {
            frame: self.frame.value_at(now),
            transform: ScaleTransform::scale(self.scale.value_at(now)),
            hidden: self.hidden,
            color,
            corner_radius,
            shadow,
            shadow_path: self.shadow_path.value_at(now),
            shadow_corner_radius,
        }
    }
}

/// A one point bar between two segments.
#[derive(Debug, Clone)]
pub(crate) struct SeparatorVisual {
    frame: Animated<Rect>,
    alpha: Animated<f32>,
}

impl Default for SeparatorVisual {
    fn default() -> Self {
        Self {
            frame: Animated::new(Rect::ZERO),
            alpha: Animated::new(1.0),
        }
    }
}

impl SeparatorVisual {
    pub(crate) fn set_frame(&mut self, frame: Rect, motion: Motion) {
        motion.apply(&mut self.frame, frame);
    }

    pub(crate) fn set_visible(&mut self, visible: bool, motion: Motion) {
        motion.apply(&mut self.alpha, if visible { 1.0 } else { 0.0 });
    }

    pub(crate) fn is_animating(&self, now: Duration) -> bool {
        self.frame.is_animating(now) || self.alpha.is_animating(now)
    }

    pub(crate) fn settle(&mut self, now: Duration) {
        self.frame.settle(now);
        self.alpha.settle(now);
    }

    pub(crate) fn snapshot(
        &self,
        color: Color,
        glyph: Option<&Arc<GlyphData>>,
        now: Duration,
    ) -> SeparatorSnapshot {
        SeparatorSnapshot {
            frame: self.frame.value_at(now),
            alpha: self.alpha.value_at(now),
            color,
            glyph: glyph.cloned(),
        }
    }
}

/// Everything the host needs to draw the control for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSnapshot {
    /// The rounded track filling the control.
    pub track: TrackSnapshot,
    /// The selection highlight.
    pub thumb: ThumbSnapshot,
    /// Separators, left to right. Draw them above the track and below the
    /// thumb.
    pub separators: Vec<SeparatorSnapshot>,
    /// Segment items, left to right. Draw them above the thumb.
    pub items: Vec<ItemSnapshot>,
}

/// The clipping container holding every other element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSnapshot {
    /// Frame, equal to the control bounds.
    pub frame: Rect,
    /// Corner radius; the track clips its children to it.
    pub corner_radius: f32,
    /// Fill colour.
    pub color: Color,
}

/// The sliding selection highlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbSnapshot {
    /// Frame before `transform` is applied.
    pub frame: Rect,
    /// Scale about the frame's centre.
    pub transform: ScaleTransform,
    /// Whether to skip drawing the thumb.
    pub hidden: bool,
    /// Fill colour.
    pub color: Color,
    /// Corner radius.
    pub corner_radius: f32,
    /// Drop shadow.
    pub shadow: Shadow,
    /// Shadow path rectangle in the thumb's own coordinates.
    pub shadow_path: Rect,
    /// Corner radius of the shadow path.
    pub shadow_corner_radius: f32,
}

/// A separator bar.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatorSnapshot {
    /// Frame.
    pub frame: Rect,
    /// Opacity; zero beside the selected segment.
    pub alpha: f32,
    /// Tint.
    pub color: Color,
    /// Template glyph tiled across the frame between its caps.
    pub glyph: Option<Arc<GlyphData>>,
}

/// A segment's content.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSnapshot {
    /// Text or image to draw.
    pub content: SegmentContent,
    /// Frame before `transform` is applied.
    pub frame: Rect,
    /// Opacity.
    pub alpha: f32,
    /// Scale about the frame's centre.
    pub transform: ScaleTransform,
    /// Label font.
    pub font: Font,
    /// Label colour, and image tint.
    pub color: Color,
    /// Whether the item shows the selected styling.
    pub selected: bool,
    /// Direction arrow of reversible segments.
    pub arrow: Option<ArrowSnapshot>,
}

/// The direction arrow beside a reversible item.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowSnapshot {
    /// Frame before `transform` and `rotation` are applied.
    pub frame: Rect,
    /// Opacity; zero unless the item is selected.
    pub alpha: f32,
    /// Scale and translation applied about the frame's centre.
    pub transform: ScaleTransform,
    /// Rotation about the frame's centre in radians; `PI` when reversed.
    pub rotation: f32,
    /// Tint.
    pub color: Color,
    /// Template glyph to draw.
    pub glyph: Option<Arc<GlyphData>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARROW: Size = Size::new(8.0, 4.0);

    fn now() -> Motion {
        Motion::immediate(Duration::ZERO)
    }

    #[test]
    fn test_alpha_prefers_dimmed_over_faded() {
        let mut visual = SegmentVisual::new(false);
        visual.set_faded(true, now());
        assert_eq!(visual.alpha.target(), 0.3);
        visual.set_dimmed(true, now());
        assert_eq!(visual.alpha.target(), 0.4);
        visual.set_dimmed(false, now());
        assert_eq!(visual.alpha.target(), 0.3);
        visual.set_faded(false, now());
        assert_eq!(visual.alpha.target(), 1.0);
    }

    #[test]
    fn test_arrow_only_shows_when_selected() {
        let mut visual = SegmentVisual::new(true);
        visual.set_frame(Rect::new(40.0, 10.0, 20.0, 12.0), ARROW, now());
        visual.set_selected(true, true, ARROW, now());

        let item = visual.snapshot(
            &"Date".into(),
            Font::system(13.0, crate::theme::FontWeight::Semibold),
            Color::BLACK,
            None,
            Duration::ZERO,
        );
        let arrow = item.arrow.expect("reversible segments have an arrow");
        assert_eq!(arrow.alpha, 0.4);
        assert_eq!(arrow.rotation, PI);
        assert_eq!(arrow.frame, Rect::new(62.0, 14.0, 8.0, 4.0));

        visual.set_selected(false, false, ARROW, now());
        assert_eq!(visual.arrow.as_ref().map(|arrow| arrow.alpha.target()), Some(0.0));
    }

    #[test]
    fn test_pressed_arrow_scales_about_item_center() {
        let mut visual = SegmentVisual::new(true);
        visual.set_frame(Rect::new(40.0, 10.0, 20.0, 12.0), ARROW, now());
        visual.set_pressed(true, ARROW, now());

        let transform = visual
            .arrow
            .as_ref()
            .map(|arrow| arrow.transform.target())
            .expect("arrow");
        // Arrow centre x is 66, item centre x is 50.
        assert_eq!(transform.scale, 0.95);
        assert!((transform.translation.x - (-0.05 * 16.0)).abs() < 1e-4);
        assert_eq!(transform.translation.y, 0.0);
        assert_eq!(visual.scale.target(), 0.95);

        visual.set_pressed(false, ARROW, now());
        assert_eq!(
            visual.arrow.as_ref().map(|arrow| arrow.transform.target()),
            Some(ScaleTransform::IDENTITY)
        );
    }

    #[test]
    fn test_reversible_toggle_adds_and_drops_arrow() {
        let mut visual = SegmentVisual::new(false);
        assert!(visual.arrow.is_none());
        visual.set_reversible(true);
        assert!(visual.arrow.is_some());
        visual.set_reversible(false);
        assert!(visual.arrow.is_none());
    }

    #[test]
    fn test_thumb_appears_in_place() {
        let mut thumb = ThumbVisual::default();
        let spec = AnimationSpec::ease_in_out(Duration::from_millis(300));
        let frame = Rect::new(100.0, 2.0, 98.0, 28.0);
        thumb.set_frame(
            frame,
            Motion::animated(spec, Duration::ZERO),
            Motion::immediate(Duration::ZERO),
        );
        assert!(!thumb.hidden);
        assert!(!thumb.is_animating(Duration::ZERO));
        assert_eq!(thumb.shadow_path.target(), Rect::new(0.0, 0.0, 98.0, 28.0));

        thumb.set_frame(
            Rect::new(2.0, 2.0, 98.0, 28.0),
            Motion::animated(spec, Duration::ZERO),
            Motion::immediate(Duration::ZERO),
        );
        assert!(thumb.is_animating(Duration::from_millis(100)));
    }

    #[test]
    fn test_shadow_path_follows_bounds_animation() {
        let mut thumb = ThumbVisual::default();
        thumb.set_frame(
            Rect::new(2.0, 2.0, 98.0, 28.0),
            Motion::immediate(Duration::ZERO),
            Motion::immediate(Duration::ZERO),
        );

        let bounds_spec = AnimationSpec::ease_in_out(Duration::from_millis(400));
        let bounds = Motion::animated(bounds_spec, Duration::ZERO);
        thumb.set_frame(Rect::new(2.0, 2.0, 198.0, 28.0), bounds, bounds);

        let mid = thumb.shadow_path.value_at(Duration::from_millis(200));
        assert!(mid.width > 98.0 && mid.width < 198.0);
        assert_eq!(thumb.shadow_path.running_spec(Duration::from_millis(200)), Some(bounds_spec));
    }
}
