//! CSS Value types and parsing
//!
//! - [CSS Values and Units Level 3](https://www.w3.org/TR/css-values-3/)
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

mod color;
pub mod length;
mod parse;
mod primitive;
mod shared;
mod unit;

pub use color::{ColorValue, parse_color_function};
pub use length::{DEFAULT_FONT_SIZE_PX, from_px, snap_px, to_px};
pub use parse::{parse_primitive, parse_value};
pub use primitive::{
    Counter, ListSeparator, ParsedValue, PrimitiveValue, Rect, RectSide, ValueKind,
};
pub use shared::SharedValue;
pub use unit::{Unit, UnitType};
