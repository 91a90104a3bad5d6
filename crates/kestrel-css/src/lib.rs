//! Specified-to-computed value resolution for CSS property values.
//!
//! # Scope
//!
//! This crate implements:
//! - **Value classification** ([CSS Values Level 3](https://www.w3.org/TR/css-values-3/))
//!   - Numbers, percentages, and dimensions per [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
//!   - Identifiers, strings, `url()`, `attr()`, `counter()`, `counters()`, `rect()`
//!   - Hex, named, `rgb()`/`rgba()`, and `hsl()`/`hsla()` colors
//!   - Comma- and space-separated value lists
//!
//! - **Absolute lengths** ([§ 5.2 Absolute lengths](https://www.w3.org/TR/css-values-3/#absolute-lengths))
//!   - in, cm, mm, pt, pc to px against a 0.28mm pixel
//!
//! - **Computed values** ([CSS Cascading Level 4 § 4.4](https://www.w3.org/TR/css-cascade-4/#computed))
//!   - `em`/`ex` against the parent font size
//!   - Percentages of `font-size` and `vertical-align` against the parent style
//!   - Percentages of the containing block, deferred until layout binds them
//!   - Typed accessors (float, string, color, counter, rect, lists)
//!
//! - **Inheritance** ([§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting))
//!   - Parent-linked computed styles
//!   - Explicit `inherit`
//!
//! # Not Yet Implemented
//!
//! - `rem`, viewport units, and `calc()`
//! - Font metrics (`ex` is approximated by the font size)
//! - Stylesheet parsing and selector matching

/// Resolver configuration.
pub mod config;
/// Computed values and their resolution per [CSS Cascading Level 4 § 4.4](https://www.w3.org/TR/css-cascade-4/#computed).
pub mod derived;
/// Error type shared by the classifier, accessors, and resolver.
pub mod error;
/// Style contexts and the property registry per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod style;
/// Parsed value model, classifier, and unit conversion per [CSS Values Level 3](https://www.w3.org/TR/css-values-3/).
pub mod values;

// Re-exports for convenience
pub use config::ResolverConfig;
pub use derived::{Computation, ContainingBlock, DerivedValue, Resolution};
pub use error::ValueError;
pub use style::{Axis, CalculatedStyle, EmptyStyle, PropertyName, StyleContext};
pub use values::{
    ColorValue, Counter, DEFAULT_FONT_SIZE_PX, ListSeparator, ParsedValue, PrimitiveValue, Rect,
    RectSide, SharedValue, Unit, UnitType, ValueKind, parse_value,
};
