//! Color identifiers and the RGBA color parser.
//!
//! Cells store colors as [`ColorValue`]: an opaque identifier (hex string,
//! functional notation, named color or the `transparent` sentinel) that is
//! assigned once and never reinterpreted by the buffer. Exporters that need
//! actual channel values call [`Rgba::parse`], a pure function that
//! understands:
//!
//! - `#rgb` and `#rrggbb`
//! - `rgb(r, g, b)` and `rgba(r, g, b, a)`, comma or whitespace separated,
//!   with integer, float or percentage channels
//!
//! Anything else, including `transparent`, parses to `None`.
//!
//! # Examples
//!
//! ```
//! use chromatext::{ColorValue, Rgba};
//!
//! let color = ColorValue::from("#f80");
//! assert_eq!(color.to_rgba().map(Rgba::to_rgb_u8), Some((255, 136, 0)));
//!
//! assert_eq!(Rgba::parse("rgba(0, 0, 255, 0.5)"), Some(Rgba::BLUE.with_alpha(0.5)));
//! assert_eq!(ColorValue::TRANSPARENT.to_rgba(), None);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Opaque color identifier attached to a character cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorValue(Cow<'static, str>);

impl ColorValue {
    /// The `transparent` sentinel, also the default fallback palette entry.
    pub const TRANSPARENT: Self = Self(Cow::Borrowed("transparent"));

    /// Wrap a color string.
    #[must_use]
    pub fn new(value: impl Into<Cow<'static, str>>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty string, which resolvers treat as "no color".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// True for the `transparent` sentinel (case-insensitive).
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.0.trim().eq_ignore_ascii_case("transparent")
    }

    /// Parse into channel values. `None` for `transparent` or unparseable input.
    #[must_use]
    pub fn to_rgba(&self) -> Option<Rgba> {
        Rgba::parse(&self.0)
    }
}

impl Default for ColorValue {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl From<&str> for ColorValue {
    fn from(value: &str) -> Self {
        Self(Cow::Owned(value.to_string()))
    }
}

impl From<String> for ColorValue {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// RGBA color with f32 components in range [0.0, 1.0].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    /// Create a new RGBA color from f32 components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from f32 RGB components.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from u8 RGB components.
    #[must_use]
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    /// Create a color from u8 RGBA components.
    #[must_use]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }

    /// Parse any supported color notation.
    ///
    /// Returns `None` for `transparent`, named colors and malformed input.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.starts_with('#') {
            return Self::from_hex(input);
        }
        let lower = input.to_ascii_lowercase();
        let args = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))?
            .strip_suffix(')')?;
        Self::from_functional_args(args)
    }

    /// Parse a hex color string (`#RGB` or `#RRGGBB`, `#` optional).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            3 => {
                // #RGB -> #RRGGBB
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Self::from_rgb_u8(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::from_rgb_u8(r, g, b))
            }
            _ => None,
        }
    }

    fn from_functional_args(args: &str) -> Option<Self> {
        let parts: Vec<&str> = if args.contains(',') {
            args.split(',').map(str::trim).collect()
        } else {
            args.split(|c: char| c.is_whitespace() || c == '/')
                .filter(|part| !part.is_empty())
                .collect()
        };
        if !(3..=4).contains(&parts.len()) {
            return None;
        }

        let r = parse_channel(parts[0])?;
        let g = parse_channel(parts[1])?;
        let b = parse_channel(parts[2])?;
        let a = match parts.get(3) {
            Some(part) => parse_alpha(part)?,
            None => 1.0,
        };
        Some(Self::new(r / 255.0, g / 255.0, b / 255.0, a))
    }

    /// Return a new color with the specified alpha value.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha,
        }
    }

    /// Convert to u8 RGB tuple, clamping values to [0, 255].
    #[must_use]
    pub fn to_rgb_u8(self) -> (u8, u8, u8) {
        let to_u8 = |value: f32| (value * 255.0).round().clamp(0.0, 255.0) as u8;
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Convert to u8 RGBA tuple, clamping values to [0, 255].
    #[must_use]
    pub fn to_rgba_u8(self) -> (u8, u8, u8, u8) {
        let (r, g, b) = self.to_rgb_u8();
        let a = (self.a * 255.0).round().clamp(0.0, 255.0) as u8;
        (r, g, b, a)
    }

    /// Check if this color is fully transparent.
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }
}

/// Channel value in 0..=255 (percentages scale to that range).
fn parse_channel(part: &str) -> Option<f32> {
    let value = if let Some(pct) = part.strip_suffix('%') {
        pct.trim().parse::<f32>().ok()? * 255.0 / 100.0
    } else {
        part.parse::<f32>().ok()?
    };
    value
        .is_finite()
        .then(|| value.clamp(0.0, 255.0).round())
}

/// Alpha value in 0..=1.
fn parse_alpha(part: &str) -> Option<f32> {
    let value = if let Some(pct) = part.strip_suffix('%') {
        pct.trim().parse::<f32>().ok()? / 100.0
    } else {
        part.parse::<f32>().ok()?
    };
    value.is_finite().then(|| value.clamp(0.0, 1.0))
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for Rgba {
    #[allow(clippy::many_single_char_names)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.to_rgba_u8();
        if a == 255 {
            write!(f, "#{r:02X}{g:02X}{b:02X}")
        } else {
            write!(f, "rgba({r}, {g}, {b}, {})", self.a.clamp(0.0, 1.0))
        }
    }
}
