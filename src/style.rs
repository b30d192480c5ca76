//! Box styling applied uniformly to every character cell.
//!
//! The core does not render anything; it carries these settings so that the
//! detailed export hands a rasterizer everything it needs without re-deriving
//! styling rules.
//!
//! # Examples
//!
//! ```
//! use chromatext::{BorderSides, CellStyle, ColorValue};
//!
//! let style = CellStyle::builder()
//!     .padding(3.0)
//!     .border(1.0, ColorValue::from("#222"))
//!     .sides(BorderSides::TOP | BorderSides::BOTTOM)
//!     .build();
//! assert!(style.has_border());
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::color::ColorValue;
use crate::error::{Error, Result};

bitflags! {
    /// Which edges of a cell draw a border.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct BorderSides: u8 {
        const TOP    = 0x01;
        const RIGHT  = 0x02;
        const BOTTOM = 0x04;
        const LEFT   = 0x08;
    }
}

impl Default for BorderSides {
    fn default() -> Self {
        Self::all()
    }
}

/// Per-cell box settings, in renderer units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    pub padding: f32,
    pub margin: f32,
    pub border_radius: f32,
    pub border_width: f32,
    pub border_color: ColorValue,
    pub border_sides: BorderSides,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            padding: 2.0,
            margin: 1.0,
            border_radius: 4.0,
            border_width: 0.0,
            border_color: ColorValue::TRANSPARENT,
            border_sides: BorderSides::all(),
        }
    }
}

impl CellStyle {
    /// Create a style builder starting from the defaults.
    #[must_use]
    pub fn builder() -> CellStyleBuilder {
        CellStyleBuilder::default()
    }

    /// True when at least one edge draws a visible border.
    #[must_use]
    pub fn has_border(&self) -> bool {
        self.border_width > 0.0 && !self.border_sides.is_empty() && !self.border_color.is_transparent()
    }

    /// Reject negative or non-finite lengths.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("cell_style.padding", self.padding),
            ("cell_style.margin", self.margin),
            ("cell_style.border_radius", self.border_radius),
            ("cell_style.border_width", self.border_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidOption {
                    name,
                    reason: format!("expected a finite, non-negative length, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Builder for [`CellStyle`].
#[derive(Clone, Debug, Default)]
pub struct CellStyleBuilder {
    style: CellStyle,
}

impl CellStyleBuilder {
    #[must_use]
    pub fn padding(mut self, padding: f32) -> Self {
        self.style.padding = padding;
        self
    }

    #[must_use]
    pub fn margin(mut self, margin: f32) -> Self {
        self.style.margin = margin;
        self
    }

    #[must_use]
    pub fn border_radius(mut self, radius: f32) -> Self {
        self.style.border_radius = radius;
        self
    }

    /// Set border width and color.
    #[must_use]
    pub fn border(mut self, width: f32, color: ColorValue) -> Self {
        self.style.border_width = width;
        self.style.border_color = color;
        self
    }

    #[must_use]
    pub fn sides(mut self, sides: BorderSides) -> Self {
        self.style.border_sides = sides;
        self
    }

    #[must_use]
    pub fn build(self) -> CellStyle {
        self.style
    }
}
