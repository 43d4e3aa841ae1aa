//! Normalized RGBA colors
//!
//! Scene documents store colors as four 0-255 channels. They are normalized
//! to 0.0-1.0 floats at load time.

/// RGBA color with each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from channels in the 0-255 domain.
    ///
    /// Values are divided by 255 without clamping, matching how authoring
    /// tools write them.
    pub fn from_channels(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(
            normalize_channel(r),
            normalize_channel(g),
            normalize_channel(b),
            normalize_channel(a),
        )
    }

    /// Channels as an `[r, g, b, a]` array.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Map a 0-255 channel value to 0.0-1.0.
pub fn normalize_channel(value: f32) -> f32 {
    value / 255.0
}
