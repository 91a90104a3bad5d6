//! Errors produced while classifying and computing values.

use thiserror::Error;

use crate::style::{Axis, PropertyName};
use crate::values::{UnitType, ValueKind};

/// Why a value could not be read, converted, or computed.
///
/// Every accessor that the CSS object model would answer with an exception
/// (or a sentinel number) returns one of these instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    ///
    /// The text looked like a number but could not be read as one.
    #[error("'{text}' is not a valid number")]
    MalformedNumber {
        /// The offending text.
        text: String,
    },

    /// The value text could not be classified.
    #[error("cannot parse '{text}': {reason}")]
    Syntax {
        /// The offending text.
        text: String,
        /// What went wrong.
        reason: &'static str,
    },

    /// [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
    ///
    /// "...as far as possible without laying out the document."
    ///
    /// The percentage is kept until the containing block is known.
    #[error("'{property}: {percentage}%' needs the containing block {axis}")]
    PendingLayout {
        /// The property the value belongs to.
        property: PropertyName,
        /// The specified percentage.
        percentage: f64,
        /// Which containing-block dimension is needed.
        axis: Axis,
    },

    /// A relative value was read before it was computed.
    #[error("value in '{unit:?}' has not been computed yet")]
    Unresolved {
        /// The relative unit the value is still in.
        unit: UnitType,
    },

    /// A scalar accessor was used on a list value, or a list accessor on a
    /// scalar.
    #[error("expected a {expected} value")]
    KindMismatch {
        /// The kind the accessor works on.
        expected: ValueKind,
    },

    /// The unit is outside the set the pixel conversion understands.
    #[error("cannot convert '{unit:?}' to pixels")]
    UnsupportedUnit {
        /// The unit that was rejected.
        unit: UnitType,
    },

    /// A float was requested in a unit the stored value cannot be expressed in.
    #[error("cannot express a '{from:?}' value in '{to:?}'")]
    UnsupportedConversion {
        /// The stored unit.
        from: UnitType,
        /// The requested unit.
        to: UnitType,
    },

    /// A numeric accessor was used on a non-numeric scalar.
    #[error("'{unit:?}' value has no number")]
    NotNumeric {
        /// The value's actual type.
        unit: UnitType,
    },

    /// A string accessor was used on a non-string scalar.
    #[error("'{unit:?}' value is not a string")]
    NotAString {
        /// The value's actual type.
        unit: UnitType,
    },

    /// A color accessor was used on a scalar that names no color.
    #[error("'{text}' is not a color")]
    NotAColor {
        /// The value's text.
        text: String,
    },

    /// A counter accessor was used on a non-counter scalar.
    #[error("'{unit:?}' value is not a counter")]
    NotACounter {
        /// The value's actual type.
        unit: UnitType,
    },

    /// A rect accessor was used on a non-rect scalar.
    #[error("'{unit:?}' value is not a rect")]
    NotARect {
        /// The value's actual type.
        unit: UnitType,
    },

    /// A property needed as a resolution base is absent from the parent style.
    #[error("parent style has no '{property}'")]
    MissingProperty {
        /// The missing property.
        property: PropertyName,
    },
}
