//! Colors and light/dark appearance resolution.
//!
//! ## Usage
//!
//! Describe a colour once with both appearance variants and resolve it when
//! the host reports the active [`Appearance`].

use bytemuck::{Pod, Zeroable};

/// A color in the linear sRGB color space with an alpha component.
///
/// Values are stored as `f32`s, typically in the range `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a new `Color` from red, green, blue and alpha.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `Color`.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// The interface style reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Appearance {
    /// Light interface style.
    #[default]
    Light,
    /// Dark interface style.
    Dark,
}

/// A colour that carries a variant for each [`Appearance`].
///
/// Default colours of the control are dynamic; explicit overrides supplied by
/// the application are usually [`DynamicColor::fixed`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicColor {
    /// Colour used with [`Appearance::Light`].
    pub light: Color,
    /// Colour used with [`Appearance::Dark`].
    pub dark: Color,
}

impl DynamicColor {
    /// Creates a colour with distinct light and dark variants.
    pub const fn new(light: Color, dark: Color) -> Self {
        Self { light, dark }
    }

    /// Creates a colour that looks the same in both appearances.
    pub const fn fixed(color: Color) -> Self {
        Self {
            light: color,
            dark: color,
        }
    }

    /// Picks the variant for `appearance`.
    pub fn resolve(&self, appearance: Appearance) -> Color {
        match appearance {
            Appearance::Light => self.light,
            Appearance::Dark => self.dark,
        }
    }
}

impl From<Color> for DynamicColor {
    fn from(color: Color) -> Self {
        Self::fixed(color)
    }
}
