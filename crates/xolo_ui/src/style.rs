//! Colours the page state hands to the host.
//!
//! Product rows are framed by a translucent ring in one of the two accent
//! hues, purple for the first row and pink for the second.

/// RGBA colour, 0-1 per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Color {
    /// Card ring for the first product row, purple-400 at half opacity.
    pub const RING_PURPLE: Self = Self::rgba(0.753, 0.518, 0.988, 0.5);
    /// Card ring for the second product row, pink-400 at half opacity.
    pub const RING_PINK: Self = Self::rgba(0.957, 0.447, 0.714, 0.5);

    /// Creates a colour from 0-1 channels.
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}
