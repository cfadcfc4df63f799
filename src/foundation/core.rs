use serde::{Deserialize, Serialize};

use crate::foundation::error::{CardError, CardResult};

pub use kurbo::Rect;

/// Pixel dimensions of a card, a region or an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Tarot card stock (70x120mm) at 300dpi.
    pub const TAROT: Size = Size::new(827, 1417);
    /// Poker card stock (2.5x3.5in) at 300dpi.
    pub const POKER: Size = Size::new(750, 1050);

    /// Build a size from width and height.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of RGBA8 bytes needed for a tightly packed buffer of this size.
    pub fn rgba8_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Straight-alpha sRGB color.
///
/// Serialized as a `#RRGGBB` / `#RRGGBBAA` string so that card and variant files stay
/// readable next to the SVG markup they end up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional, case-insensitive).
    pub fn parse_hex(s: &str) -> CardResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> CardResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| CardError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        if !s.is_ascii() {
            return Err(CardError::validation(format!(
                "hex color must be ascii, got \"{s}\""
            )));
        }

        match s.len() {
            3 => {
                let mut ch = [0u8; 3];
                for (i, c) in s.chars().enumerate() {
                    let nibble = hex_byte(&c.to_string())?;
                    ch[i] = nibble * 17;
                }
                Ok(Self::rgb(ch[0], ch[1], ch[2]))
            }
            6 => Ok(Self::rgb(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            8 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: hex_byte(&s[6..8])?,
            }),
            _ => Err(CardError::validation(
                "hex color must be #RGB, #RRGGBB or #RRGGBBAA",
            )),
        }
    }

    /// `#rrggbb` form used in SVG attributes. Alpha is emitted separately as an opacity.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a `0.0..=1.0` opacity.
    pub fn opacity(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    /// Premultiplied RGBA8 pixel.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let mul = |c: u8| ((u16::from(c) * a + 127) / 255) as u8;
        [mul(self.r), mul(self.g), mul(self.b), self.a]
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.a == 255 {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_str(&format!("{}{:02x}", self.to_hex(), self.a))
        }
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rgba8::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Which part of an image survives when a cover resize has to crop it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropGravity {
    /// Crop evenly from both ends.
    #[default]
    Center,
    /// Keep the top edge (keeps faces in head-and-shoulders portraits).
    Top,
    /// Keep the bottom edge.
    Bottom,
}

/// Integer pixel rectangle helper for region math.
pub fn rect_px(x: u32, y: u32, width: u32, height: u32) -> Rect {
    Rect::new(
        f64::from(x),
        f64::from(y),
        f64::from(x) + f64::from(width),
        f64::from(y) + f64::from(height),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
