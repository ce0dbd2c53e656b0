//! Pure layout math for the segmented control.
//!
//! ## Usage
//!
//! Build a [`SegmentGeometry`] from the control's current size and style, then
//! ask it for the frames of segments, the thumb, separators and direction
//! arrows. Nothing here holds state.

use crate::{
    rect::{Point, Rect, Size},
    theme::SegmentedControlDefaults,
};

/// Layout inputs for one control at one size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentGeometry {
    /// Size of the control (and of its track).
    pub bounds: Size,
    /// Number of segments.
    pub segment_count: usize,
    /// Gap between the track edge and the thumb.
    pub inset: f32,
    /// Corner radius of the track.
    pub corner_radius: f32,
}

impl SegmentGeometry {
    /// Creates the geometry for a control of `bounds` with `segment_count`
    /// segments.
    pub fn new(bounds: Size, segment_count: usize, inset: f32, corner_radius: f32) -> Self {
        Self {
            bounds,
            segment_count,
            inset,
            corner_radius,
        }
    }

    /// Width of every segment, floored to whole points.
    ///
    /// Zero when there are no segments.
    pub fn segment_width(&self) -> f32 {
        if self.segment_count == 0 {
            return 0.0;
        }
        ((self.bounds.width - self.inset * 2.0) / self.segment_count as f32).floor()
    }

    /// Frame of the segment at `index`, which is also where the thumb sits
    /// when that segment is selected.
    ///
    /// The x origin is clamped to `[inset, width - segment_width - inset]` so
    /// rounding can never push the last segment past the track.
    pub fn frame_for_segment(&self, index: usize) -> Rect {
        let segment_width = self.segment_width();
        let mut frame = Rect::new(
            self.inset + segment_width * index as f32,
            self.inset,
            segment_width,
            self.bounds.height - self.inset * 2.0,
        );

        frame.x = frame.x.max(self.inset);
        frame.x = frame
            .x
            .min(self.bounds.width - (segment_width + self.inset));

        frame.integral()
    }

    /// Index of the segment under `point`, or `None` without segments.
    ///
    /// Hit-testing divides the full control width, ignoring the inset, so
    /// its boundaries drift from [`Self::frame_for_segment`] near the edges.
    /// Points outside the control clamp to the first or last segment.
    pub fn segment_index_for_point(&self, point: Point) -> Option<usize> {
        if self.segment_count == 0 {
            return None;
        }
        let last = (self.segment_count - 1) as f32;
        let segment_width = (self.bounds.width / self.segment_count as f32).floor();
        if segment_width <= 0.0 {
            return Some(0);
        }
        let index = (point.x / segment_width).floor().clamp(0.0, last);
        Some(index as usize)
    }

    /// Frame of a direction arrow of `arrow_size` placed right of
    /// `item_frame`, vertically centred on it.
    pub fn frame_for_direction_arrow(item_frame: Rect, arrow_size: Size) -> Rect {
        Rect::new(
            item_frame.max_x() + SegmentedControlDefaults::DIRECTION_ARROW_MARGIN,
            (item_frame.mid_y() - arrow_size.height * 0.5).ceil(),
            arrow_size.width,
            arrow_size.height,
        )
    }

    /// Number of separators between segments.
    pub fn separator_count(&self) -> usize {
        self.segment_count.saturating_sub(1)
    }

    /// Frame of the separator right of segment `index`.
    ///
    /// Separators are one point wide and as tall as the straight part of the
    /// track edge plus a point at either end.
    pub fn frame_for_separator(&self, index: usize) -> Rect {
        let segment_width = self.segment_width();
        let height = (self.bounds.height - self.corner_radius * 2.0) + 2.0;
        Rect::new(
            (self.inset + segment_width) - 1.0 + segment_width * index as f32,
            (self.bounds.height - height) * 0.5,
            1.0,
            height,
        )
        .integral()
    }

    /// Frame of an item's content inside the segment at `index`.
    ///
    /// The content keeps its natural size capped to the segment. Reversible
    /// segments give up room for an arrow on either side when the content
    /// would otherwise crowd it out.
    pub fn frame_for_item(
        &self,
        index: usize,
        natural_size: Size,
        arrow_width: Option<f32>,
    ) -> Rect {
        let segment_frame = self.frame_for_segment(index);
        let mut size = Size::new(
            natural_size.width.min(segment_frame.width),
            natural_size.height.min(segment_frame.height),
        );

        if let Some(arrow_width) = arrow_width {
            let arrow_spacing =
                (arrow_width + SegmentedControlDefaults::DIRECTION_ARROW_MARGIN) * 2.0;
            if size.width + arrow_spacing > segment_frame.width {
                size.width -= arrow_spacing;
            }
        }

        Rect::new(
            segment_frame.mid_x() - size.width * 0.5,
            segment_frame.mid_y() - size.height * 0.5,
            size.width,
            size.height,
        )
        .integral()
    }

    /// Rectangle of the thumb's shadow path, in the thumb's own coordinates.
    pub fn shadow_path_for_thumb(thumb_frame: Rect) -> Rect {
        Rect::from_size(thumb_frame.size())
    }
}
