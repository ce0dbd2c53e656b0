//! Segment model: content, per-segment flags and content measurement.
//!
//! ## Usage
//!
//! Segments are created and owned by
//! [`SegmentedControl`](crate::control::SegmentedControl); applications
//! describe them with [`SegmentContent`].

use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use crate::{
    rect::Size,
    theme::{Font, FontWeight},
    visual::SegmentVisual,
};

/// Decoded image pixels supplied by the application.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// RGBA8 pixel data.
    pub data: Arc<Vec<u8>>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixels per logical point.
    pub scale: f32,
}

impl ImageData {
    /// Wraps already decoded RGBA8 pixels.
    pub fn new(data: impl Into<Arc<Vec<u8>>>, width: u32, height: u32, scale: f32) -> Self {
        Self {
            data: data.into(),
            width,
            height,
            scale,
        }
    }

    /// Natural size of the image in logical points.
    pub fn size(&self) -> Size {
        let scale = if self.scale > 0.0 { self.scale } else { 1.0 };
        Size::new(self.width as f32 / scale, self.height as f32 / scale)
    }
}

/// What a segment displays: a text label or an image, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentContent {
    /// A text label.
    Text(String),
    /// An image, tinted like a template glyph by the host.
    Image(Arc<ImageData>),
}

impl SegmentContent {
    /// The label, if this is text content.
    pub fn title(&self) -> Option<&str> {
        match self {
            SegmentContent::Text(title) => Some(title),
            SegmentContent::Image(_) => None,
        }
    }

    /// The image, if this is image content.
    pub fn image(&self) -> Option<&Arc<ImageData>> {
        match self {
            SegmentContent::Text(_) => None,
            SegmentContent::Image(image) => Some(image),
        }
    }
}

impl From<&str> for SegmentContent {
    fn from(title: &str) -> Self {
        SegmentContent::Text(title.to_owned())
    }
}

impl From<String> for SegmentContent {
    fn from(title: String) -> Self {
        SegmentContent::Text(title)
    }
}

impl From<ImageData> for SegmentContent {
    fn from(image: ImageData) -> Self {
        SegmentContent::Image(Arc::new(image))
    }
}

impl From<Arc<ImageData>> for SegmentContent {
    fn from(image: Arc<ImageData>) -> Self {
        SegmentContent::Image(image)
    }
}

/// One selectable unit of the control.
///
/// A segment can only be reversed while it is reversible; clearing the
/// reversible flag also clears the reversed flag.
#[derive(Debug, Clone)]
pub struct Segment {
    content: SegmentContent,
    disabled: bool,
    reversible: bool,
    reversed: bool,
    pub(crate) visual: SegmentVisual,
}

impl Segment {
    pub(crate) fn new(content: SegmentContent, reversible: bool) -> Self {
        Self {
            content,
            disabled: false,
            reversible,
            reversed: false,
            visual: SegmentVisual::new(reversible),
        }
    }

    /// The displayed content.
    pub fn content(&self) -> &SegmentContent {
        &self.content
    }

    /// Whether touches on this segment are ignored.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether tapping this segment again while selected flips its direction.
    pub fn is_reversible(&self) -> bool {
        self.reversible
    }

    /// Whether the segment's direction is currently flipped.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub(crate) fn set_content(&mut self, content: SegmentContent) {
        self.content = content;
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub(crate) fn set_reversible(&mut self, reversible: bool) {
        self.reversible = reversible;
        if !reversible {
            self.reversed = false;
        }
    }

    /// Returns `false` when the segment is not reversible and nothing changed.
    pub(crate) fn set_reversed(&mut self, reversed: bool) -> bool {
        if !self.reversible {
            return false;
        }
        self.reversed = reversed;
        true
    }

    pub(crate) fn toggle_direction(&mut self) {
        debug_assert!(self.reversible, "only reversible segments toggle");
        self.reversed = !self.reversed;
    }
}

/// Measures the natural size of segment content.
///
/// Text shaping belongs to the host, so the control asks it for sizes during
/// layout. Closures of the matching signature implement this trait.
pub trait ContentMeasurer: Send + Sync {
    /// Returns the natural size of `content` drawn with `font`.
    fn measure(&self, content: &SegmentContent, font: &Font) -> Size;
}

impl<F> ContentMeasurer for F
where
    F: Fn(&SegmentContent, &Font) -> Size + Send + Sync,
{
    fn measure(&self, content: &SegmentContent, font: &Font) -> Size {
        self(content, font)
    }
}

/// A measurer that estimates label sizes from grapheme counts.
///
/// Images report their natural size. Useful for tests and for hosts that
/// re-measure labels themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedMetrics;

impl EstimatedMetrics {
    const LINE_HEIGHT_FACTOR: f32 = 1.2;

    fn advance_factor(weight: FontWeight) -> f32 {
        match weight {
            FontWeight::Regular => 0.55,
            FontWeight::Medium => 0.57,
            FontWeight::Semibold => 0.59,
            FontWeight::Bold => 0.61,
        }
    }
}

impl ContentMeasurer for EstimatedMetrics {
    fn measure(&self, content: &SegmentContent, font: &Font) -> Size {
        match content {
            SegmentContent::Text(title) => {
                let graphemes = title.graphemes(true).count() as f32;
                Size::new(
                    (graphemes * font.size * Self::advance_factor(font.weight)).ceil(),
                    font.size * Self::LINE_HEIGHT_FACTOR,
                )
            }
            SegmentContent::Image(image) => image.size(),
        }
    }
}
