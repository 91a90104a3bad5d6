//! Unit tags for CSS primitive values
//!
//! [CSS Values and Units Level 3](https://www.w3.org/TR/css-values-3/)

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// [§ 4 Distance Units](https://www.w3.org/TR/css-values-3/#lengths)
/// [§ 6 Other Units](https://www.w3.org/TR/css-values-3/#other-units)
///
/// "A dimension is a number immediately followed by a unit identifier."
///
/// The unit identifiers the classifier recognizes. Matching is ASCII
/// case-insensitive: "`1PX`" and "`1px`" are the same length.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// "1px = 1/96th of 1in" (here: 0.28mm, see [`crate::values::length`])
    Px,
    /// "Equal to the computed value of the font-size property of the element"
    Em,
    /// "Equal to the used x-height of the first available font"
    Ex,
    /// "1in = 2.54cm"
    In,
    /// "1cm = 96px/2.54"
    Cm,
    /// "1mm = 1/10th of 1cm"
    Mm,
    /// "1pt = 1/72th of 1in"
    Pt,
    /// "1pc = 1/6th of 1in" (12pt)
    Pc,
    /// Degrees.
    Deg,
    /// Radians.
    Rad,
    /// Gradians.
    Grad,
    /// Milliseconds.
    Ms,
    /// Seconds.
    S,
    /// Hertz.
    Hz,
    /// Kilohertz.
    KHz,
}

impl Unit {
    /// [§ 5.2 Absolute lengths](https://www.w3.org/TR/css-values-3/#absolute-lengths)
    ///
    /// "The absolute length units are fixed in relation to each other."
    #[must_use]
    pub const fn is_absolute_length(self) -> bool {
        matches!(
            self,
            Self::Px | Self::In | Self::Cm | Self::Mm | Self::Pt | Self::Pc
        )
    }

    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-3/#font-relative-lengths)
    #[must_use]
    pub const fn is_font_relative(self) -> bool {
        matches!(self, Self::Em | Self::Ex)
    }
}

/// The type tag of a primitive value.
///
/// Mirrors the primitive-type classification of the CSS object model: every
/// scalar carries exactly one of these tags, and only the numeric ones carry a
/// number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "unit", rename_all = "kebab-case")]
pub enum UnitType {
    /// A unitless `<number>`.
    Number,
    /// A `<percentage>`.
    Percentage,
    /// A `<dimension>` with a recognized unit.
    Dimension(Unit),
    /// A `<dimension>` whose unit the engine does not know, kept verbatim.
    UnknownDimension(String),
    /// A quoted `<string>`.
    String,
    /// A `url()`.
    Uri,
    /// An `<ident>` keyword.
    Ident,
    /// An `attr()` reference.
    Attr,
    /// A `counter()` or `counters()` function.
    Counter,
    /// A `rect()` shape.
    Rect,
    /// An RGB(A) color.
    RgbColor,
}

impl UnitType {
    /// Pixels, the unit every resolved length ends up in.
    pub const PX: Self = Self::Dimension(Unit::Px);

    /// Whether values of this type carry a number.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Number | Self::Percentage | Self::Dimension(_) | Self::UnknownDimension(_)
        )
    }

    /// Whether the value depends on context that is unknown when it is
    /// parsed: a percentage or a font-relative length.
    #[must_use]
    pub const fn is_relative(&self) -> bool {
        match self {
            Self::Percentage => true,
            Self::Dimension(unit) => unit.is_font_relative(),
            _ => false,
        }
    }

    /// Whether the value is an absolute length (including `px`).
    #[must_use]
    pub const fn is_absolute_length(&self) -> bool {
        matches!(self, Self::Dimension(unit) if unit.is_absolute_length())
    }

    /// The text that follows the number when the value is serialized.
    #[must_use]
    pub fn suffix(&self) -> &str {
        match self {
            Self::Percentage => "%",
            Self::Dimension(unit) => unit.as_ref(),
            Self::UnknownDimension(unit) => unit,
            _ => "",
        }
    }
}

impl From<Unit> for UnitType {
    fn from(unit: Unit) -> Self {
        Self::Dimension(unit)
    }
}
