//! RGBA colors and the shorthand forms accepted by the drawing API.

use egui::Color32;

/// An 8-bit-per-channel RGBA color (unmultiplied alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Opaque grayscale color
    pub const fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    pub fn to_egui(self) -> Color32 {
        Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl From<u8> for Color {
    fn from(value: u8) -> Self {
        Color::gray(value)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Color::rgba(r, g, b, a)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color::rgb(r, g, b)
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Color::rgba(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grayscale_expands_to_opaque_rgb() {
        for g in [0u8, 1, 100, 254, 255] {
            assert_eq!(Color::from(g), Color::from((g, g, g)));
            assert_eq!(Color::from(g).a, 255);
        }
    }

    #[test]
    fn test_rgb_gets_full_alpha() {
        assert_eq!(Color::from((10, 20, 30)), Color::rgba(10, 20, 30, 255));
        assert_eq!(Color::from([10, 20, 30]), Color::rgba(10, 20, 30, 255));
    }

    #[test]
    fn test_rgba_passes_through() {
        assert_eq!(Color::from((1, 2, 3, 4)), Color::rgba(1, 2, 3, 4));
        assert_eq!(Color::from([1, 2, 3, 4]), Color::rgba(1, 2, 3, 4));
    }
}
