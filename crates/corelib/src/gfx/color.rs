use std::str::FromStr;

/// Represents a non-premultiplied RGBA color, each channel in the 0-1 range
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red value
    pub r: f32,
    /// Green value
    pub g: f32,
    /// Blue value
    pub b: f32,
    /// Alpha value
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
    pub const NAVY: Color = Color::new(0.0, 0.0, 0.5, 1.0);

    #[inline(always)]
    /// Create a new color from red, green, blue and alpha values
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline(always)]
    /// Create a new color from an alpha-first hexadecimal number like 0x280000ff (0xAARRGGBB)
    pub const fn argb_hex(hex: u32) -> Self {
        Self::rgba_u8(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
            ((hex >> 24) & 0xFF) as u8,
        )
    }

    #[inline(always)]
    /// Create a new color from rgba bytes
    pub const fn rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    #[inline(always)]
    /// Returns the same color with the alpha passed
    pub const fn with_alpha(&self, alpha: f32) -> Color {
        Self::new(self.r, self.g, self.b, alpha)
    }

    /// Returns the alpha-first hexadecimal representation like 0xAARRGGBB
    pub fn to_argb_hex(&self) -> u32 {
        let [r, g, b, a] = self.to_rgba_u8();
        u32::from_be_bytes([a, r, g, b])
    }

    /// Returns byte representation of the color, rounding to the nearest value
    pub fn to_rgba_u8(&self) -> [u8; 4] {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [byte(self.r), byte(self.g), byte(self.b), byte(self.a)]
    }
}

/// Parses `#RRGGBB` or `#AARRGGBB`, the first one is opaque
impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| format!("Invalid color '{s}': it must start with '#'"))?;

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("Invalid color '{s}': only hex digits are allowed"));
        }

        let value = u32::from_str_radix(digits, 16)
            .map_err(|e| format!("Invalid color '{s}': {e}"))?;

        match digits.len() {
            6 => Ok(Color::argb_hex(0xFF000000 | value)),
            8 => Ok(Color::argb_hex(value)),
            _ => Err(format!(
                "Invalid color '{s}': expected #RRGGBB or #AARRGGBB"
            )),
        }
    }
}

impl From<Color> for tiny_skia::Color {
    fn from(c: Color) -> Self {
        let [r, g, b, a] = c.to_rgba_u8();
        tiny_skia::Color::from_rgba8(r, g, b, a)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:08X}", self.to_argb_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_hex() {
        let color = Color::argb_hex(0x280000FF);
        assert_eq!(color.to_rgba_u8(), [0, 0, 255, 0x28]);
        assert_eq!(color.to_argb_hex(), 0x280000FF);
        assert_eq!(Color::argb_hex(0xFFFF0000), Color::RED);
    }

    #[test]
    fn test_color_to_rgba_u8() {
        let color = Color::new(0.5, 0.4, 0.3, 1.0);
        assert_eq!(color.to_rgba_u8(), [128, 102, 77, 255]);

        // out of range channels are clamped
        let color = Color::new(2.0, -1.0, 0.0, 1.0);
        assert_eq!(color.to_rgba_u8(), [255, 0, 0, 255]);
    }

    #[test]
    fn test_parse_color_strings() {
        assert_eq!("#FF0000".parse::<Color>(), Ok(Color::RED));
        assert_eq!("#ff0000ff".parse::<Color>(), Ok(Color::BLUE));
        assert_eq!(
            "#3C0000FF".parse::<Color>().map(|c| c.to_rgba_u8()),
            Ok([0, 0, 255, 0x3C])
        );

        assert!("FF0000".parse::<Color>().is_err());
        assert!("#FF00".parse::<Color>().is_err());
        assert!("#GG0000".parse::<Color>().is_err());
        assert!("#+FFFFF".parse::<Color>().is_err());
        assert!("#".parse::<Color>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        let color = Color::argb_hex(0x800A0B0C);
        assert_eq!(color.to_string(), "#800A0B0C");
        assert_eq!(color.to_string().parse::<Color>(), Ok(color));
    }
}
