// color.rs - Canvas colour values
//
// Colours stay in the space they are authored in (RGBA for the starfield,
// HSLA for the abstract field) and are only formatted to CSS at replay time.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    /// Straight-alpha RGB bytes, alpha in `[0, 1]`.
    Rgba { r: u8, g: u8, b: u8, a: f32 },
    /// Hue in degrees, saturation/lightness in percent, alpha in `[0, 1]`.
    Hsla { h: f32, s: f32, l: f32, a: f32 },
}

impl Color {
    pub const TRANSPARENT_WHITE: Color = Color::rgba(255, 255, 255, 0.0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Color::Rgba { r, g, b, a }
    }

    /// Hue is wrapped into `[0, 360)`, alpha clamped into `[0, 1]`.
    pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        Color::Hsla { h: wrap_hue(h), s, l, a: a.clamp(0.0, 1.0) }
    }

    pub fn alpha(self) -> f32 {
        match self {
            Color::Rgba { a, .. } | Color::Hsla { a, .. } => a,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Rgba { r, g, b, a } => write!(f, "rgba({r}, {g}, {b}, {a})"),
            Color::Hsla { h, s, l, a } => write!(f, "hsla({h}, {s}%, {l}%, {a})"),
        }
    }
}

#[inline]
pub fn wrap_hue(h: f32) -> f32 {
    h.rem_euclid(360.0)
}
