//! Relative value resolution
//!
//! [CSS Values and Units Level 3 § 5.1 Relative lengths](https://www.w3.org/TR/css-values-3/#relative-lengths)
//! [CSS Values and Units Level 3 § 4.3 Percentages](https://www.w3.org/TR/css-values-3/#percentages)
//!
//! "Percentage values are always relative to another quantity, for example a
//! length. Each property that allows percentages also defines the quantity to
//! which the percentage refers."
//!
//! Percentages are resolved in two passes. The style pass handles bases known
//! from the parent style (font size, line height). Percentages of the
//! containing block stay pending until layout calls
//! [`DerivedValue::bind_containing_block`].

use kestrel_common::warning::{info_once, warn_once};
use serde::Serialize;

use super::{Computation, DerivedValue, classify};
use crate::error::ValueError;
use crate::style::{Axis, EmptyStyle, PropertyName, StyleContext};
use crate::values::{PrimitiveValue, Unit, UnitType};

/// Base for percentages of properties with no special rule.
const DEFAULT_PERCENTAGE_BASE: f64 = 1.0;

/// What a resolution request did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum Resolution {
    /// The value is now an absolute pixel length.
    Resolved {
        /// The computed length.
        px: f64,
    },
    /// The value is a percentage of the containing block and waits for
    /// layout.
    PendingLayout {
        /// The property the percentage belongs to.
        property: PropertyName,
        /// The specified percentage.
        percentage: f64,
        /// The containing-block dimension it refers to.
        axis: Axis,
    },
    /// The value was already absolute; nothing changed.
    Unchanged,
}

/// [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS21/visudet.html#containing-block-details)
///
/// "The position and size of an element's box(es) are sometimes calculated
/// relative to a certain rectangle, called the containing block of the
/// element."
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ContainingBlock {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ContainingBlock {
    /// The dimension along `axis`.
    #[must_use]
    pub const fn dimension(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }
}

impl DerivedValue {
    /// [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
    ///
    /// Resolve a percentage or font-relative length against `parent`, the
    /// computed style of the parent element.
    ///
    /// STEP 1: If another holder of the raw value already wrote an absolute
    ///         length to it and this value is still relative, adopt that
    ///         length.
    /// STEP 2: An absolute value is left alone.
    /// STEP 3: Multiply the number by the base the unit and property call
    ///         for: the parent font size for `em`/`ex` and `font-size`
    ///         percentages, the parent line height for `vertical-align`
    ///         percentages, 1 for percentages of other properties.
    ///         Percentages of the containing block become pending instead.
    /// STEP 4: Snap to a whole pixel, store it, and write `<n>px` back to the
    ///         raw value so every holder sees the computed length.
    ///
    /// # Errors
    ///
    /// - [`ValueError::MissingProperty`] when `vertical-align` is a percentage
    ///   and the parent has no `line-height`.
    /// - The parent's own error when the base it holds is not computed.
    pub fn compute_relative_unit(
        &mut self,
        parent: &dyn StyleContext,
        property: &PropertyName,
    ) -> Result<Resolution, ValueError> {
        // STEP 1
        self.adopt_shared_rewrite();

        // STEP 2
        let (value, unit) = match &self.state {
            Computation::Relative { value, unit } => (*value, unit.clone()),
            Computation::PendingLayout { percentage, .. } => (*percentage, UnitType::Percentage),
            Computation::Absolute { .. } | Computation::NonNumeric => {
                info_once(
                    "CSS",
                    &format!(
                        "'{property}: {}' is already computed, nothing to resolve",
                        self.raw
                    ),
                );
                return Ok(Resolution::Unchanged);
            }
        };

        // STEP 3
        let px = match unit {
            // [§ 5.1.1 Font-relative lengths]
            // "em unit: Equal to the computed value of the font-size property
            // of the element on which it is used."
            //
            // ex uses the same base; there are no font metrics here to find
            // the x-height.
            UnitType::Dimension(Unit::Em | Unit::Ex) => value * self.parent_font_size(parent)?,
            UnitType::Percentage => match property {
                // [§ 10.8.1 vertical-align]
                // "<percentage>: Raise (positive value) or lower (negative
                // value) the box by this distance (a percentage of the
                // 'line-height' value)."
                PropertyName::VerticalAlign => {
                    let line_height = parent
                        .property_by_name(&PropertyName::LineHeight)
                        .ok_or(ValueError::MissingProperty {
                            property: PropertyName::LineHeight,
                        })?
                        .as_float()?;
                    value / 100.0 * line_height
                }
                // [§ 15.7 font-size]
                // "<percentage>: A percentage value specifies an absolute font
                // size relative to the parent element's font size."
                PropertyName::FontSize => value / 100.0 * self.parent_font_size(parent)?,
                other => {
                    if let Some(axis) = other.containing_block_axis() {
                        return Ok(self.defer_to_layout(value, other, axis));
                    }
                    value / 100.0 * DEFAULT_PERCENTAGE_BASE
                }
            },
            unit => return Err(ValueError::UnsupportedUnit { unit }),
        };

        // STEP 4
        Ok(Resolution::Resolved {
            px: self.finish(px),
        })
    }

    /// Resolve against the style this value was built with.
    ///
    /// # Errors
    ///
    /// See [`Self::compute_relative_unit`].
    pub fn resolve(&mut self, property: &PropertyName) -> Result<Resolution, ValueError> {
        match self.inherited.clone() {
            Some(inherited) => self.compute_relative_unit(inherited.as_ref(), property),
            None => self.compute_relative_unit(&EmptyStyle, property),
        }
    }

    /// Complete a pending percentage once the containing block is known.
    ///
    /// Returns the computed pixel length. Absolute values return their
    /// number unchanged.
    ///
    /// # Errors
    ///
    /// - [`ValueError::Unresolved`] for relative values that were never given
    ///   a parent style.
    /// - [`ValueError::NotNumeric`] and [`ValueError::KindMismatch`] for
    ///   values without a number.
    pub fn bind_containing_block(&mut self, block: ContainingBlock) -> Result<f64, ValueError> {
        // A pending percentage always binds to its own containing block, even
        // when another holder of the raw value was bound first.
        self.adopt_shared_rewrite();

        match &self.state {
            Computation::PendingLayout {
                percentage, axis, ..
            } => {
                let px = percentage / 100.0 * block.dimension(*axis);
                Ok(self.finish(px))
            }
            Computation::Absolute { value, .. } => Ok(*value),
            Computation::Relative { .. } | Computation::NonNumeric => self.as_float(),
        }
    }

    /// Take over an absolute length another holder wrote to the raw value.
    ///
    /// Only a still-relative value adopts it. A pending percentage depends on
    /// its own element's containing block.
    fn adopt_shared_rewrite(&mut self) {
        if !matches!(self.state, Computation::Relative { .. }) {
            return;
        }
        let current = classify(&self.raw, &self.config);
        if matches!(current, Computation::Absolute { .. }) {
            self.state = current;
        }
    }

    fn defer_to_layout(
        &mut self,
        percentage: f64,
        property: &PropertyName,
        axis: Axis,
    ) -> Resolution {
        warn_once(
            "CSS",
            &format!(
                "'{property}: {percentage}%' needs the containing block {axis}, deferred to layout"
            ),
        );
        self.state = Computation::PendingLayout {
            percentage,
            property: property.clone(),
            axis,
        };
        Resolution::PendingLayout {
            property: property.clone(),
            percentage,
            axis,
        }
    }

    /// The parent's computed font size, or the configured default when the
    /// parent has none.
    fn parent_font_size(&self, parent: &dyn StyleContext) -> Result<f64, ValueError> {
        let Some(font_size) = parent.property_by_name(&PropertyName::FontSize) else {
            warn_once(
                "CSS",
                &format!(
                    "parent style has no font-size, using {}px",
                    self.config.default_font_size_px
                ),
            );
            return Ok(self.config.default_font_size_px);
        };
        font_size.as_float()
    }

    /// Store a computed pixel length and write it back to the raw value.
    fn finish(&mut self, px: f64) -> f64 {
        let px = self.config.snap(px);

        #[cfg(feature = "style-trace")]
        eprintln!("[STYLE] {} -> {px}px", self.raw);

        self.state = Computation::Absolute {
            value: px,
            unit: UnitType::PX,
        };
        self.raw.set_primitive(PrimitiveValue::numeric(px, Unit::Px));
        px
    }
}
