//! Property names that change how a value is computed.
//!
//! [CSS 2.1 Appendix F. Full property table](https://www.w3.org/TR/CSS21/propidx.html)

use std::fmt;

use serde::{Serialize, Serializer};
use strum_macros::Display;

/// A property identifier.
///
/// Only the properties whose percentages or font-relative lengths need a
/// special base get their own variant; everything else is kept by name in
/// [`PropertyName::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyName {
    /// [§ 9.3.2 Box offsets](https://www.w3.org/TR/CSS21/visuren.html#propdef-bottom)
    Bottom,
    /// [§ 9.3.2 Box offsets](https://www.w3.org/TR/CSS21/visuren.html#propdef-top)
    Top,
    /// [§ 9.3.2 Box offsets](https://www.w3.org/TR/CSS21/visuren.html#propdef-left)
    Left,
    /// [§ 9.3.2 Box offsets](https://www.w3.org/TR/CSS21/visuren.html#propdef-right)
    Right,
    /// [§ 10.5 Content height](https://www.w3.org/TR/CSS21/visudet.html#propdef-height)
    Height,
    /// [§ 10.7 Minimum and maximum heights](https://www.w3.org/TR/CSS21/visudet.html#propdef-max-height)
    MaxHeight,
    /// [§ 10.7 Minimum and maximum heights](https://www.w3.org/TR/CSS21/visudet.html#propdef-min-height)
    MinHeight,
    /// [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS21/visudet.html#propdef-max-width)
    MaxWidth,
    /// [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS21/visudet.html#propdef-min-width)
    MinWidth,
    /// [§ 16.1 Indentation](https://www.w3.org/TR/CSS21/text.html#propdef-text-indent)
    TextIndent,
    /// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS21/visudet.html#propdef-vertical-align)
    VerticalAlign,
    /// [§ 15.7 Font size](https://www.w3.org/TR/CSS21/fonts.html#propdef-font-size)
    FontSize,
    /// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS21/visudet.html#propdef-line-height)
    LineHeight,
    /// Any other property, by lowercase name.
    Other(String),
}

/// A containing-block dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// The containing block's width.
    Width,
    /// The containing block's height.
    Height,
}

impl PropertyName {
    /// Look a property up by name (ASCII case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "bottom" => Self::Bottom,
            "top" => Self::Top,
            "left" => Self::Left,
            "right" => Self::Right,
            "height" => Self::Height,
            "max-height" => Self::MaxHeight,
            "min-height" => Self::MinHeight,
            "max-width" => Self::MaxWidth,
            "min-width" => Self::MinWidth,
            "text-indent" => Self::TextIndent,
            "vertical-align" => Self::VerticalAlign,
            "font-size" => Self::FontSize,
            "line-height" => Self::LineHeight,
            _ => Self::Other(name),
        }
    }

    /// The property's CSS name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bottom => "bottom",
            Self::Top => "top",
            Self::Left => "left",
            Self::Right => "right",
            Self::Height => "height",
            Self::MaxHeight => "max-height",
            Self::MinHeight => "min-height",
            Self::MaxWidth => "max-width",
            Self::MinWidth => "min-width",
            Self::TextIndent => "text-indent",
            Self::VerticalAlign => "vertical-align",
            Self::FontSize => "font-size",
            Self::LineHeight => "line-height",
            Self::Other(name) => name,
        }
    }

    /// [§ 7.2 Inherited Properties](https://www.w3.org/TR/css-cascade-4/#inherited-property)
    ///
    /// Whether the property's computed value passes to children that do not
    /// set it. Only tracked for the named properties.
    #[must_use]
    pub const fn is_inherited(&self) -> bool {
        matches!(self, Self::FontSize | Self::LineHeight | Self::TextIndent)
    }

    /// [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS21/visudet.html#containing-block-details)
    ///
    /// The containing-block dimension a percentage of this property refers to,
    /// or `None` when percentages of this property do not need layout.
    ///
    /// "Percentages: refer to height of containing block" (top, bottom, height,
    /// min-height, max-height); "refer to width of containing block" (left,
    /// right, min-width, max-width, text-indent).
    #[must_use]
    pub const fn containing_block_axis(&self) -> Option<Axis> {
        match self {
            Self::Top | Self::Bottom | Self::Height | Self::MinHeight | Self::MaxHeight => {
                Some(Axis::Height)
            }
            Self::Left | Self::Right | Self::MinWidth | Self::MaxWidth | Self::TextIndent => {
                Some(Axis::Width)
            }
            Self::VerticalAlign | Self::FontSize | Self::LineHeight | Self::Other(_) => None,
        }
    }
}

impl From<&str> for PropertyName {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PropertyName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
