//! The parsed value model
//!
//! [CSS Values and Units Level 3](https://www.w3.org/TR/css-values-3/)
//!
//! A declaration value is either a single primitive value or a list of them.
//! Every primitive carries a [`UnitType`] tag; numeric primitives also carry
//! their number.

use std::fmt;

use serde::Serialize;
use strum_macros::Display;

use super::color::ColorValue;
use super::unit::UnitType;

/// [CSS 2.1 § 12.4 Automatic counters and numbering](https://www.w3.org/TR/CSS21/generate.html#counters)
///
/// "Counters are denoted by case-sensitive identifiers... To refer to the value
/// of a counter, the notation 'counter(`<identifier>`)' or
/// 'counter(`<identifier>`, `<'list-style-type'>`)' is used."
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counter {
    /// The counter's name.
    pub identifier: String,
    /// The list style used to render the counter, if one was given.
    pub list_style: Option<String>,
    /// "counters(`<identifier>`, `<string>`)": the string joining nested
    /// counters. `None` for `counter()`.
    pub separator: Option<String>,
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.separator {
            Some(separator) => {
                write!(f, "counters({}, ", self.identifier)?;
                serialize_string(separator, f)?;
            }
            None => write!(f, "counter({}", self.identifier)?,
        }
        if let Some(style) = &self.list_style {
            write!(f, ", {style}")?;
        }
        f.write_str(")")
    }
}

/// One edge of a `rect()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RectSide {
    /// "auto": the edge coincides with the element's border edge.
    Auto,
    /// A length offset.
    Length {
        /// The number as written.
        value: f64,
        /// Its unit.
        unit: UnitType,
    },
}

impl fmt::Display for RectSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Length { value, unit } => write!(f, "{value}{}", unit.suffix()),
        }
    }
}

/// [CSS 2.1 § 11.1.2 Clipping: the 'clip' property](https://www.w3.org/TR/CSS21/visufx.html#clipping)
///
/// "rect(`<top>`, `<right>`, `<bottom>`, `<left>`)"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rect {
    /// Top offset.
    pub top: RectSide,
    /// Right offset.
    pub right: RectSide,
    /// Bottom offset.
    pub bottom: RectSide,
    /// Left offset.
    pub left: RectSide,
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rect({}, {}, {}, {})",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// A single component value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveValue {
    /// A `<number>`, `<percentage>`, or `<dimension>`.
    Numeric {
        /// The number as written.
        value: f64,
        /// Its unit tag.
        unit: UnitType,
    },
    /// A quoted string, without the quotes.
    String(String),
    /// The URL inside `url()`.
    Uri(String),
    /// An identifier keyword.
    Ident(String),
    /// The attribute name inside `attr()`.
    Attr(String),
    /// A `counter()` or `counters()`.
    Counter(Counter),
    /// A `rect()`.
    Rect(Rect),
    /// A hex or functional color.
    Color(ColorValue),
}

impl PrimitiveValue {
    /// A numeric value in `unit`.
    #[must_use]
    pub fn numeric(value: f64, unit: impl Into<UnitType>) -> Self {
        Self::Numeric {
            value,
            unit: unit.into(),
        }
    }

    /// The value's type tag.
    #[must_use]
    pub fn unit_type(&self) -> UnitType {
        match self {
            Self::Numeric { unit, .. } => unit.clone(),
            Self::String(_) => UnitType::String,
            Self::Uri(_) => UnitType::Uri,
            Self::Ident(_) => UnitType::Ident,
            Self::Attr(_) => UnitType::Attr,
            Self::Counter(_) => UnitType::Counter,
            Self::Rect(_) => UnitType::Rect,
            Self::Color(_) => UnitType::RgbColor,
        }
    }

    /// The number of a numeric value.
    #[must_use]
    pub const fn number(&self) -> Option<f64> {
        match self {
            Self::Numeric { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// The text of a string-like value (string, URI, identifier, attribute).
    #[must_use]
    pub fn string_value(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Uri(s) | Self::Ident(s) | Self::Attr(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric { value, unit } => write!(f, "{value}{}", unit.suffix()),
            Self::String(s) => serialize_string(s, f),
            Self::Uri(url) => write!(f, "url({url})"),
            Self::Ident(ident) => f.write_str(ident),
            Self::Attr(name) => write!(f, "attr({name})"),
            Self::Counter(counter) => fmt::Display::fmt(counter, f),
            Self::Rect(rect) => fmt::Display::fmt(rect, f),
            Self::Color(color) => f.write_str(&color.to_hex_string()),
        }
    }
}

/// [CSSOM § 2.1 Serialize a string](https://drafts.csswg.org/cssom/#serialize-a-string)
///
/// "To serialize a string means to create a string represented by '"'
/// (U+0022), followed by the result of applying the rules below to each
/// character of the given string, followed by '"' (U+0022)"
fn serialize_string(s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '\0' => write!(f, "{}", char::REPLACEMENT_CHARACTER)?,
            '\u{1}'..='\u{1f}' | '\u{7f}' => write!(f, "\\{:x} ", u32::from(c))?,
            '"' | '\\' => write!(f, "\\{c}")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

/// Whether a value is one component or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// A single primitive value.
    Scalar,
    /// An ordered list of primitive values.
    List,
}

/// What separates the items of a value list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListSeparator {
    /// `a, b, c`
    Comma,
    /// `a b c`
    Space,
}

impl ListSeparator {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Comma => ", ",
            Self::Space => " ",
        }
    }
}

/// A classified declaration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParsedValue {
    /// One component.
    Single(PrimitiveValue),
    /// Several components.
    List {
        /// The components in source order.
        items: Vec<PrimitiveValue>,
        /// How they were separated.
        separator: ListSeparator,
    },
}

impl ParsedValue {
    /// Scalar or list.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Single(_) => ValueKind::Scalar,
            Self::List { .. } => ValueKind::List,
        }
    }

    /// The primitive of a scalar value.
    #[must_use]
    pub const fn as_primitive(&self) -> Option<&PrimitiveValue> {
        match self {
            Self::Single(primitive) => Some(primitive),
            Self::List { .. } => None,
        }
    }
}

impl fmt::Display for ParsedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(primitive) => fmt::Display::fmt(primitive, f),
            Self::List { items, separator } => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(separator.as_str())?;
                    }
                    fmt::Display::fmt(item, f)?;
                }
                Ok(())
            }
        }
    }
}
