use palette::{FromColor, Hsl as PaletteHsl, Srgb};

/// Error returned when a string is not a well-formed 6-digit hex color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid hex color '{0}': expected 6 hex digits")]
    Length(String),
    #[error("invalid hex color '{0}': contains a non-hex digit")]
    Digit(String),
}

/// Core color type used throughout the crate.
/// Wraps sRGB u8 components, so every channel is in [0, 255] by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in whole degrees [0, 360), saturation and lightness in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    pub const fn new(h: u16, s: u8, l: u8) -> Self {
        Self { h, s, l }
    }
}

impl std::fmt::Display for Hsl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}%, {}%", self.h, self.s, self.l)
    }
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800`, `#FF8800` or `ff8800`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Err(ColorError::Length(hex.to_string()));
        }
        // from_str_radix tolerates a leading '+', so check every byte first.
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::Digit(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorError::Digit(hex.to_string()))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Comma separated channels, e.g. `255, 136, 0`.
    pub fn to_rgb_string(self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }

    /// Convert to `palette::Srgb<u8>`.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Convert to HSL, rounded to whole degrees and percentages.
    /// Achromatic colors get hue 0.
    pub fn to_hsl(self) -> Hsl {
        let srgb_f32: Srgb<f32> = self.to_srgb_u8().into_format();
        let hsl: PaletteHsl = PaletteHsl::from_color(srgb_f32);
        let hue = hsl.hue.into_positive_degrees();
        let h = if hue.is_finite() {
            (hue.round() as u16) % 360
        } else {
            0
        };
        let s = (hsl.saturation.clamp(0.0, 1.0) * 100.0).round() as u8;
        let l = (hsl.lightness.clamp(0.0, 1.0) * 100.0).round() as u8;
        Hsl::new(h, s, l)
    }

    /// Euclidean distance in RGB space. Not perceptually uniform.
    pub fn distance(self, other: Color) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Perceived brightness in [0, 1] per WCAG 2.0. Picks legible text over a
    /// swatch.
    pub fn relative_luminance(self) -> f32 {
        fn linearize(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        let r = linearize(self.r);
        let g = linearize(self.g);
        let b = linearize(self.b);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
