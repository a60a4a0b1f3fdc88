use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors from parsing `#rrggbb` / `#rrggbbaa` color strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string does not start with `#`.
    MissingHash(String),
    /// The digit count is not 6 (or 8 where alpha is accepted).
    BadLength(String),
    /// A character outside `[0-9a-fA-F]`.
    BadDigit(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHash(s) => write!(f, "color {s:?} must start with '#'"),
            Self::BadLength(s) => write!(f, "color {s:?} has the wrong number of hex digits"),
            Self::BadDigit(s) => write!(f, "color {s:?} contains a non-hex digit"),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// BT.709 luma in `0..=255`.
    #[must_use]
    pub fn luminance_u8(self) -> u8 {
        let luma = 2126 * u32::from(self.r) + 7152 * u32::from(self.g) + 722 * u32::from(self.b);
        ((luma + 5000) / 10_000) as u8
    }

    #[must_use]
    pub fn is_light(self) -> bool {
        self.luminance_u8() >= 128
    }

    /// Fixed-point blend towards `other`; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t256 = (t.clamp(0.0, 1.0) * 256.0) as u32;
        let inv = 256 - t256;
        let mix = |a: u8, b: u8| ((u32::from(a) * inv + u32::from(b) * t256) >> 8) as u8;
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = hex_digits(s)?;
        if digits.len() != 6 {
            return Err(ColorParseError::BadLength(s.to_owned()));
        }
        let [r, g, b] = parse_channels::<3>(s, digits)?;
        Ok(Self::new(r, g, b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

/// RGB color with 8-bit straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn opaque(rgb: Rgb) -> Self {
        Self::new(rgb.r, rgb.g, rgb.b, 255)
    }

    #[must_use]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    #[must_use]
    pub fn alpha_f64(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// CSS `rgba(r, g, b, a)` with the alpha rounded to three decimals.
    #[must_use]
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.alpha_f64()
        )
    }

    /// Lowercase `#rrggbbaa`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("{}{:02x}", self.rgb().to_hex(), self.a)
    }

    /// Parse `#rrggbb` (alpha 255) or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = hex_digits(s)?;
        match digits.len() {
            6 => {
                let [r, g, b] = parse_channels::<3>(s, digits)?;
                Ok(Self::new(r, g, b, 255))
            }
            8 => {
                let [r, g, b, a] = parse_channels::<4>(s, digits)?;
                Ok(Self::new(r, g, b, a))
            }
            _ => Err(ColorParseError::BadLength(s.to_owned())),
        }
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Self::opaque(rgb)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

fn hex_digits(s: &str) -> Result<&str, ColorParseError> {
    let trimmed = s.trim();
    trimmed
        .strip_prefix('#')
        .ok_or_else(|| ColorParseError::MissingHash(s.to_owned()))
}

fn parse_channels<const N: usize>(original: &str, digits: &str) -> Result<[u8; N], ColorParseError> {
    if !digits.is_ascii() {
        return Err(ColorParseError::BadDigit(original.to_owned()));
    }
    let mut out = [0u8; N];
    for (i, slot) in out.iter_mut().enumerate() {
        let pair = &digits[i * 2..i * 2 + 2];
        *slot = u8::from_str_radix(pair, 16)
            .map_err(|_| ColorParseError::BadDigit(original.to_owned()))?;
    }
    Ok(out)
}
