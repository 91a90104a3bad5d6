//! Absolute length conversion
//!
//! [CSS Values and Units Level 3 § 5.2](https://www.w3.org/TR/css-values-3/#absolute-lengths)
//!
//! "The absolute length units are fixed in relation to each other and anchored
//! to some physical measurement."
//!
//! Lengths are anchored to a pixel of 0.28mm, the reference pixel size of a
//! 90dpi display. Every conversion goes through millimetres:
//! pc -> pt -> in -> cm -> mm -> px.

use super::unit::{Unit, UnitType};
use crate::error::ValueError;

/// User agent default font size.
/// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
/// "Initial: medium" - we define medium as 16px per common browser convention.
pub const DEFAULT_FONT_SIZE_PX: f64 = 16.0;

/// Millimetres covered by one pixel.
pub const MM_PER_PX: f64 = 0.28;
/// "1cm = 10mm"
pub const MM_PER_CM: f64 = 10.0;
/// "1in = 2.54cm"
pub const CM_PER_IN: f64 = 2.54;
/// "1pt = 1/72th of 1in"
pub const PT_PER_IN: f64 = 72.0;
/// "1pc = 12pt"
pub const PT_PER_PC: f64 = 12.0;

/// Convert `value`, expressed in `unit`, to pixels.
///
/// Only absolute lengths convert. Percentages and font-relative units need a
/// style context (see [`crate::DerivedValue::compute_relative_unit`]).
///
/// # Errors
///
/// Returns [`ValueError::UnsupportedUnit`] for any unit that is not an
/// absolute length.
pub fn to_px(value: f64, unit: &UnitType) -> Result<f64, ValueError> {
    let px = length_to_px(value, unit)?;

    #[cfg(feature = "style-trace")]
    eprintln!("[STYLE] {value}{} -> {px}px", unit.suffix());

    Ok(px)
}

/// Convert a pixel length into `unit`, the inverse of [`to_px`].
///
/// # Errors
///
/// Returns [`ValueError::UnsupportedUnit`] for any unit that is not an
/// absolute length.
pub fn from_px(px: f64, unit: &UnitType) -> Result<f64, ValueError> {
    // Scale factor of one `unit` in pixels; conversion is linear.
    let one = length_to_px(1.0, unit)?;
    Ok(px / one)
}

fn length_to_px(value: f64, unit: &UnitType) -> Result<f64, ValueError> {
    let UnitType::Dimension(length_unit) = unit else {
        return Err(ValueError::UnsupportedUnit { unit: unit.clone() });
    };

    let px = match length_unit {
        Unit::Px => value,
        Unit::Mm => mm_to_px(value),
        Unit::Cm => mm_to_px(value * MM_PER_CM),
        Unit::In => mm_to_px(value * CM_PER_IN * MM_PER_CM),
        Unit::Pt => mm_to_px(value / PT_PER_IN * CM_PER_IN * MM_PER_CM),
        Unit::Pc => mm_to_px(value * PT_PER_PC / PT_PER_IN * CM_PER_IN * MM_PER_CM),
        Unit::Em
        | Unit::Ex
        | Unit::Deg
        | Unit::Rad
        | Unit::Grad
        | Unit::Ms
        | Unit::S
        | Unit::Hz
        | Unit::KHz => return Err(ValueError::UnsupportedUnit { unit: unit.clone() }),
    };
    Ok(px)
}

/// Round a pixel length down to a whole pixel.
///
/// Computed lengths are never sub-pixel; the fractional part is dropped
/// towards negative infinity.
#[must_use]
pub fn snap_px(px: f64) -> f64 {
    px.floor()
}

fn mm_to_px(mm: f64) -> f64 {
    mm / MM_PER_PX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_factor_matches_traced_conversion() {
        for unit in [Unit::Px, Unit::Mm, Unit::Cm, Unit::In, Unit::Pt, Unit::Pc] {
            let unit = UnitType::Dimension(unit);
            let traced = to_px(1.0, &unit).unwrap();
            let untraced = length_to_px(1.0, &unit).unwrap();
            assert!((traced - untraced).abs() < 1e-9, "{unit:?}");
            assert!((from_px(traced, &unit).unwrap() - 1.0).abs() < 1e-9);
        }
        assert!(length_to_px(1.0, &UnitType::Dimension(Unit::Em)).is_err());
    }
}
