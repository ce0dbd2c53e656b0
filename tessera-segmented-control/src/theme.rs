//! Cosmetic configuration and defaults for the segmented control.
//!
//! ## Usage
//!
//! Override only the attributes you care about; everything left unset
//! resolves to [`SegmentedControlDefaults`] and follows the host's light/dark
//! appearance.

use derive_setters::Setters;

use crate::{
    color::{Appearance, Color, DynamicColor},
    rect::Point,
};

/// Font weights used by segment labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Regular,
    /// Medium weight.
    Medium,
    /// Semibold weight.
    Semibold,
    /// Bold weight.
    Bold,
}

/// A system font description handed to the host's text renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// Point size.
    pub size: f32,
    /// Weight.
    pub weight: FontWeight,
}

impl Font {
    /// Creates a system font description.
    pub const fn system(size: f32, weight: FontWeight) -> Self {
        Self { size, weight }
    }
}

/// Drop shadow drawn beneath the thumb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Shadow colour before opacity is applied.
    pub color: Color,
    /// Offset of the shadow.
    pub offset: Point,
    /// Opacity of the shadow.
    pub opacity: f32,
    /// Blur radius.
    pub radius: f32,
}

/// Default values and visual constants of the segmented control.
pub struct SegmentedControlDefaults;

impl SegmentedControlDefaults {
    /// Default control size when none is provided.
    pub const WIDTH: f32 = 300.0;
    /// Default control height.
    pub const HEIGHT: f32 = 32.0;
    /// Corner radius of the track.
    pub const CORNER_RADIUS: f32 = 8.0;
    /// Gap between the track edge and the thumb.
    pub const THUMB_INSET: f32 = 2.0;
    /// Blur radius of the thumb shadow.
    pub const THUMB_SHADOW_RADIUS: f32 = 3.0;
    /// Vertical offset of the thumb shadow.
    pub const THUMB_SHADOW_OFFSET: f32 = 2.0;
    /// Opacity of the thumb shadow.
    pub const THUMB_SHADOW_OPACITY: f32 = 0.13;
    /// Alpha of an item while it previews a new selection.
    pub const FADED_ITEM_ALPHA: f32 = 0.3;
    /// Alpha of disabled items.
    pub const DISABLED_ALPHA: f32 = 0.4;
    /// Scale of the thumb and selected item while pressed.
    pub const PRESSED_SCALE: f32 = 0.95;
    /// Alpha of the direction arrow on the selected item.
    pub const DIRECTION_ARROW_ALPHA: f32 = 0.4;
    /// Gap between an item and its direction arrow.
    pub const DIRECTION_ARROW_MARGIN: f32 = 2.0;

    /// Label font of unselected items.
    pub const fn text_font() -> Font {
        Font::system(13.0, FontWeight::Medium)
    }

    /// Label font of the selected item.
    pub const fn selected_text_font() -> Font {
        Font::system(13.0, FontWeight::Semibold)
    }

    /// Track background colour.
    pub const fn background_color() -> DynamicColor {
        DynamicColor::new(
            Color::new(0.0, 0.0, 0.08, 0.06666),
            Color::new(0.898, 0.898, 1.0, 0.12),
        )
    }

    /// Thumb fill colour.
    pub const fn thumb_color() -> DynamicColor {
        DynamicColor::new(Color::WHITE, Color::from_rgb(0.357, 0.357, 0.376))
    }

    /// Separator tint.
    pub const fn separator_color() -> DynamicColor {
        DynamicColor::new(
            Color::new(0.0, 0.0, 0.08, 0.1),
            Color::new(0.918, 0.918, 1.0, 0.16),
        )
    }

    /// Label colour used for both unselected and selected items.
    pub const fn label_color() -> DynamicColor {
        DynamicColor::new(Color::BLACK, Color::WHITE)
    }
}

/// Cosmetic overrides for a segmented control.
///
/// Every `None` resolves to the matching [`SegmentedControlDefaults`] value.
#[derive(Debug, Clone, PartialEq, Default, Setters)]
pub struct SegmentedControlStyle {
    /// Track background colour.
    #[setters(strip_option, into)]
    pub background_color: Option<DynamicColor>,
    /// Thumb fill colour.
    #[setters(strip_option, into)]
    pub thumb_color: Option<DynamicColor>,
    /// Separator tint.
    #[setters(strip_option, into)]
    pub separator_color: Option<DynamicColor>,
    /// Label and glyph tint of unselected items.
    #[setters(strip_option, into)]
    pub item_color: Option<DynamicColor>,
    /// Label and glyph tint of the selected item.
    #[setters(strip_option, into)]
    pub selected_item_color: Option<DynamicColor>,
    /// Label font of unselected items.
    #[setters(strip_option)]
    pub text_font: Option<Font>,
    /// Label font of the selected item.
    #[setters(strip_option)]
    pub selected_text_font: Option<Font>,
    /// Corner radius of the track.
    #[setters(strip_option)]
    pub corner_radius: Option<f32>,
    /// Gap between the track edge and the thumb.
    #[setters(strip_option)]
    pub thumb_inset: Option<f32>,
    /// Blur radius of the thumb shadow.
    #[setters(strip_option)]
    pub thumb_shadow_radius: Option<f32>,
    /// Vertical offset of the thumb shadow.
    #[setters(strip_option)]
    pub thumb_shadow_offset: Option<f32>,
    /// Opacity of the thumb shadow.
    #[setters(strip_option)]
    pub thumb_shadow_opacity: Option<f32>,
}

impl SegmentedControlStyle {
    /// Resolves every attribute, filling unset ones with defaults and picking
    /// colour variants for `appearance`.
    pub fn resolve(&self, appearance: Appearance) -> ResolvedStyle {
        let color = |value: Option<DynamicColor>, default: DynamicColor| {
            value.unwrap_or(default).resolve(appearance)
        };
        ResolvedStyle {
            corner_radius: self
                .corner_radius
                .unwrap_or(SegmentedControlDefaults::CORNER_RADIUS),
            thumb_inset: self
                .thumb_inset
                .unwrap_or(SegmentedControlDefaults::THUMB_INSET),
            text_font: self
                .text_font
                .unwrap_or_else(SegmentedControlDefaults::text_font),
            selected_text_font: self
                .selected_text_font
                .unwrap_or_else(SegmentedControlDefaults::selected_text_font),
            thumb_shadow: Shadow {
                color: Color::BLACK,
                offset: Point::new(
                    0.0,
                    self.thumb_shadow_offset
                        .unwrap_or(SegmentedControlDefaults::THUMB_SHADOW_OFFSET),
                ),
                opacity: self
                    .thumb_shadow_opacity
                    .unwrap_or(SegmentedControlDefaults::THUMB_SHADOW_OPACITY),
                radius: self
                    .thumb_shadow_radius
                    .unwrap_or(SegmentedControlDefaults::THUMB_SHADOW_RADIUS),
            },
            colors: SegmentedControlColors {
                background: color(
                    self.background_color,
                    SegmentedControlDefaults::background_color(),
                ),
                thumb: color(self.thumb_color, SegmentedControlDefaults::thumb_color()),
                separator: color(
                    self.separator_color,
                    SegmentedControlDefaults::separator_color(),
                ),
                item: color(self.item_color, SegmentedControlDefaults::label_color()),
                selected_item: color(
                    self.selected_item_color,
                    SegmentedControlDefaults::label_color(),
                ),
            },
        }
    }
}

/// A [`SegmentedControlStyle`] with every attribute filled in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStyle {
    /// Corner radius of the track.
    pub corner_radius: f32,
    /// Gap between the track edge and the thumb.
    pub thumb_inset: f32,
    /// Label font of unselected items.
    pub text_font: Font,
    /// Label font of the selected item.
    pub selected_text_font: Font,
    /// Shadow beneath the thumb.
    pub thumb_shadow: Shadow,
    /// Colours for the active appearance.
    pub colors: SegmentedControlColors,
}

impl ResolvedStyle {
    /// Corner radius of the thumb.
    pub fn thumb_corner_radius(&self) -> f32 {
        (self.corner_radius - self.thumb_inset) + 1.0
    }

    /// Corner radius of the thumb's shadow path.
    pub fn thumb_shadow_corner_radius(&self) -> f32 {
        self.corner_radius - self.thumb_inset
    }
}

/// Colours of the control resolved against one [`Appearance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentedControlColors {
    /// Track background.
    pub background: Color,
    /// Thumb fill.
    pub thumb: Color,
    /// Separator tint.
    pub separator: Color,
    /// Unselected item tint.
    pub item: Color,
    /// Selected item tint.
    pub selected_item: Color,
}
