/// Linear RGB color used for lights, stickers and the background
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::rgb(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Component-wise product, used to tint a surface by incoming light
    pub fn modulate(self, other: Color) -> Self {
        Self::rgb(self.r * other.r, self.g * other.g, self.b * other.b)
    }

    /// Perceived brightness (Rec. 709 weights)
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    /// Clamp to `[0, 1]` and quantize to 8-bit channels
    pub fn to_rgb8(&self) -> [u8; 3] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl std::ops::Add for Color {
    type Output = Color;

    fn add(self, other: Color) -> Color {
        Color::rgb(self.r + other.r, self.g + other.g, self.b + other.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
        let orange = Color::from_hex(0xff8000);
        assert_eq!(orange.to_rgb8(), [255, 128, 0]);
    }

    #[test]
    fn test_to_rgb8_clamps_overexposure() {
        assert_eq!(Color::WHITE.scale(1.3).to_rgb8(), [255, 255, 255]);
    }
}
