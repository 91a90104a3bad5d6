//! Derived values
//!
//! [CSS Cascading Level 4 § 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//!
//! "The computed value is the result of resolving the specified value as
//! defined in the 'Computed Value' line of the property definition table,
//! generally absolutizing it in preparation for inheritance."
//!
//! A [`DerivedValue`] wraps the shared parsed value of one declaration and
//! tracks how far it has been computed. Absolute lengths are converted to
//! pixels as soon as the value is built; percentages and font-relative
//! lengths wait for [`DerivedValue::compute_relative_unit`].

mod resolve;

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

pub use resolve::{ContainingBlock, Resolution};

use crate::config::ResolverConfig;
use crate::error::ValueError;
use crate::style::{Axis, PropertyName, StyleContext};
use crate::values::{
    ColorValue, Counter, PrimitiveValue, Rect, SharedValue, UnitType, ValueKind, from_px, to_px,
};

/// How far a value has been computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum Computation {
    /// A number that needs no context: a length in pixels, or a number,
    /// angle, time, or frequency in its own unit.
    Absolute {
        /// The computed number.
        value: f64,
        /// The unit the number is in.
        unit: UnitType,
    },
    /// A percentage or font-relative length that has not been computed.
    Relative {
        /// The specified number.
        value: f64,
        /// The relative unit.
        unit: UnitType,
    },
    /// A percentage that refers to the containing block, which is not known
    /// until layout.
    PendingLayout {
        /// The specified percentage.
        percentage: f64,
        /// The property the percentage belongs to.
        property: PropertyName,
        /// The containing-block dimension it refers to.
        axis: Axis,
    },
    /// A value without a number (keyword, string, color, list, ...).
    NonNumeric,
}

/// The computed form of one property value.
///
/// Copies made with [`DerivedValue::copy`] share the underlying
/// [`SharedValue`]; writes through one are seen by all.
pub struct DerivedValue {
    raw: SharedValue,
    kind: ValueKind,
    specified_unit: Option<UnitType>,
    state: Computation,
    /// Filled on first call to [`Self::as_string_array`] and kept even if the
    /// raw value changes afterwards.
    string_parts: OnceCell<Vec<String>>,
    inherited: Option<Rc<dyn StyleContext>>,
    config: ResolverConfig,
}

impl DerivedValue {
    /// Wrap `raw` with the default configuration.
    #[must_use]
    pub fn new(raw: SharedValue, inherited: Option<Rc<dyn StyleContext>>) -> Self {
        Self::with_config(raw, inherited, ResolverConfig::default())
    }

    /// Wrap `raw`, classifying it and converting absolute lengths to pixels.
    #[must_use]
    pub fn with_config(
        raw: SharedValue,
        inherited: Option<Rc<dyn StyleContext>>,
        config: ResolverConfig,
    ) -> Self {
        let kind = raw.kind();
        let specified_unit = raw.primitive().map(|primitive| primitive.unit_type());
        let state = classify(&raw, &config);
        Self {
            raw,
            kind,
            specified_unit,
            state,
            string_parts: OnceCell::new(),
            inherited,
            config,
        }
    }

    /// A new wrapper over the same raw value and inherited style.
    ///
    /// The computation state is re-read from the raw value, not copied: a
    /// copy of a resolved value sees the rewritten pixel length, a copy of a
    /// pending value starts out relative again.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self::with_config(self.raw.clone(), self.inherited.clone(), self.config)
    }

    /// Whether the value is a single primitive.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.kind == ValueKind::Scalar
    }

    /// Whether the value is a list.
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.kind == ValueKind::List
    }

    /// [§ 7.3 Explicit Inheritance](https://www.w3.org/TR/css-cascade-4/#inherit)
    ///
    /// Whether the value text contains the `inherit` keyword.
    #[must_use]
    pub fn has_forced_inherit(&self) -> bool {
        self.raw
            .css_text()
            .split(|c: char| c == ',' || c.is_whitespace())
            .any(|token| token.eq_ignore_ascii_case("inherit"))
    }

    /// Whether the value still needs a parent style or a containing block.
    #[must_use]
    pub const fn requires_computation(&self) -> bool {
        matches!(
            self.state,
            Computation::Relative { .. } | Computation::PendingLayout { .. }
        )
    }

    /// Whether the value is a percentage waiting for the containing block.
    #[must_use]
    pub const fn is_pending_layout(&self) -> bool {
        matches!(self.state, Computation::PendingLayout { .. })
    }

    /// The computation state.
    #[must_use]
    pub const fn computation(&self) -> &Computation {
        &self.state
    }

    /// The shared raw value.
    #[must_use]
    pub const fn css_value(&self) -> &SharedValue {
        &self.raw
    }

    /// The raw value's current text.
    #[must_use]
    pub fn css_text(&self) -> String {
        self.raw.css_text()
    }

    /// The style this value was built against.
    #[must_use]
    pub fn inherited_context(&self) -> Option<&dyn StyleContext> {
        self.inherited.as_deref()
    }

    /// The configuration the value computes with.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The unit the value had when this wrapper was built, for scalars.
    #[must_use]
    pub const fn specified_unit(&self) -> Option<&UnitType> {
        self.specified_unit.as_ref()
    }

    /// The computed number.
    ///
    /// # Errors
    ///
    /// - [`ValueError::KindMismatch`] for lists.
    /// - [`ValueError::Unresolved`] before a relative value is computed.
    /// - [`ValueError::PendingLayout`] while waiting for the containing block.
    /// - [`ValueError::NotNumeric`] for scalars without a number.
    pub fn as_float(&self) -> Result<f64, ValueError> {
        self.require_scalar()?;
        match &self.state {
            Computation::Absolute { value, .. } => Ok(*value),
            Computation::Relative { unit, .. } => {
                Err(ValueError::Unresolved { unit: unit.clone() })
            }
            Computation::PendingLayout {
                percentage,
                property,
                axis,
            } => Err(ValueError::PendingLayout {
                property: property.clone(),
                percentage: *percentage,
                axis: *axis,
            }),
            Computation::NonNumeric => Err(ValueError::NotNumeric {
                unit: self.primitive_type()?,
            }),
        }
    }

    /// The text of a string, URI, identifier, or attribute value.
    ///
    /// # Errors
    ///
    /// [`ValueError::KindMismatch`] for lists and [`ValueError::NotAString`]
    /// for other scalars.
    pub fn as_string(&self) -> Result<String, ValueError> {
        let primitive = self.primitive()?;
        primitive
            .string_value()
            .map(str::to_string)
            .ok_or_else(|| ValueError::NotAString {
                unit: primitive.unit_type(),
            })
    }

    /// Alias of [`Self::as_string`].
    ///
    /// # Errors
    ///
    /// See [`Self::as_string`].
    pub fn get_string_value(&self) -> Result<String, ValueError> {
        self.as_string()
    }

    /// The value text split on commas.
    ///
    /// Segments are trimmed unless `trim_list_segments` is off. The result is
    /// computed once; later writes to the raw value do not refresh it.
    #[must_use]
    pub fn as_string_array(&self) -> &[String] {
        self.string_parts.get_or_init(|| {
            let text = self.raw.css_text();
            text.split(',')
                .map(|part| {
                    if self.config.trim_list_segments {
                        part.trim().to_string()
                    } else {
                        part.to_string()
                    }
                })
                .collect()
        })
    }

    /// [CSS Color Level 4 § 4.2 The RGB functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
    ///
    /// The value as an RGBA color. `transparent` is zero alpha over black.
    ///
    /// # Errors
    ///
    /// [`ValueError::KindMismatch`] for lists and [`ValueError::NotAColor`]
    /// for scalars that name no color.
    pub fn as_color(&self) -> Result<ColorValue, ValueError> {
        let primitive = self.primitive()?;
        match &primitive {
            PrimitiveValue::Ident(ident) if ident.eq_ignore_ascii_case("transparent") => {
                Ok(ColorValue::TRANSPARENT)
            }
            PrimitiveValue::Ident(ident) => ColorValue::from_named(ident).ok_or_else(|| {
                ValueError::NotAColor {
                    text: ident.clone(),
                }
            }),
            PrimitiveValue::Color(color) => Ok(*color),
            other => Err(ValueError::NotAColor {
                text: other.to_string(),
            }),
        }
    }

    /// The effective type tag: pixels once a length has been computed,
    /// otherwise the raw value's tag.
    ///
    /// # Errors
    ///
    /// [`ValueError::KindMismatch`] for lists.
    pub fn primitive_type(&self) -> Result<UnitType, ValueError> {
        self.require_scalar()?;
        if let Computation::Absolute { unit, .. } = &self.state {
            return Ok(unit.clone());
        }
        Ok(self.primitive()?.unit_type())
    }

    /// The number expressed in `unit`.
    ///
    /// A number read in the unit it was written in comes back as written.
    /// Absolute lengths convert between each other from the unsnapped
    /// length, except `px`, which yields the computed pixels. Any other unit
    /// can only be read back in itself; a relative value read in its own unit
    /// yields the specified number.
    ///
    /// # Errors
    ///
    /// [`ValueError::UnsupportedConversion`] when the number cannot be
    /// expressed in `unit`, and the errors of [`Self::as_float`].
    pub fn get_float_value(&self, unit: &UnitType) -> Result<f64, ValueError> {
        self.require_scalar()?;
        match &self.state {
            Computation::Absolute { value, unit: from } => {
                let written = match self.primitive()? {
                    PrimitiveValue::Numeric { value, unit } => Some((value, unit)),
                    _ => None,
                };
                if let Some((number, written_unit)) = &written
                    && written_unit == unit
                {
                    Ok(*number)
                } else if from == unit {
                    Ok(*value)
                } else if from.is_absolute_length() && unit.is_absolute_length() {
                    // Convert from the unsnapped length as written.
                    let px = match &written {
                        Some((number, written_unit)) if written_unit.is_absolute_length() => {
                            to_px(*number, written_unit)?
                        }
                        _ => *value,
                    };
                    from_px(px, unit)
                } else {
                    Err(ValueError::UnsupportedConversion {
                        from: from.clone(),
                        to: unit.clone(),
                    })
                }
            }
            Computation::Relative { value, unit: from } if from == unit => Ok(*value),
            Computation::PendingLayout { percentage, .. } if *unit == UnitType::Percentage => {
                Ok(*percentage)
            }
            Computation::Relative { .. }
            | Computation::PendingLayout { .. }
            | Computation::NonNumeric => self.as_float(),
        }
    }

    /// [CSS 2.1 § 12.4](https://www.w3.org/TR/CSS21/generate.html#counters)
    ///
    /// # Errors
    ///
    /// [`ValueError::KindMismatch`] for lists and [`ValueError::NotACounter`]
    /// for other scalars.
    pub fn get_counter_value(&self) -> Result<Counter, ValueError> {
        match self.primitive()? {
            PrimitiveValue::Counter(counter) => Ok(counter),
            other => Err(ValueError::NotACounter {
                unit: other.unit_type(),
            }),
        }
    }

    /// [CSS 2.1 § 11.1.2](https://www.w3.org/TR/CSS21/visufx.html#clipping)
    ///
    /// # Errors
    ///
    /// [`ValueError::KindMismatch`] for lists and [`ValueError::NotARect`]
    /// for other scalars.
    pub fn get_rect_value(&self) -> Result<Rect, ValueError> {
        match self.primitive()? {
            PrimitiveValue::Rect(rect) => Ok(rect),
            other => Err(ValueError::NotARect {
                unit: other.unit_type(),
            }),
        }
    }

    /// The items of a list value.
    ///
    /// # Errors
    ///
    /// [`ValueError::KindMismatch`] for scalars.
    pub fn list_items(&self) -> Result<Vec<PrimitiveValue>, ValueError> {
        if !self.is_list() {
            return Err(ValueError::KindMismatch {
                expected: ValueKind::List,
            });
        }
        Ok(self.raw.items())
    }

    /// The `index`th item of a list value.
    ///
    /// # Errors
    ///
    /// [`ValueError::KindMismatch`] for scalars.
    pub fn item(&self, index: usize) -> Result<Option<PrimitiveValue>, ValueError> {
        Ok(self.list_items()?.into_iter().nth(index))
    }

    /// Replace the number and unit.
    ///
    /// # Errors
    ///
    /// [`ValueError::KindMismatch`] for lists and [`ValueError::NotNumeric`]
    /// when the current value has no number.
    pub fn set_float_value(
        &mut self,
        unit: impl Into<UnitType>,
        value: f64,
    ) -> Result<(), ValueError> {
        let current = self.primitive()?;
        if !current.unit_type().is_numeric() {
            return Err(ValueError::NotNumeric {
                unit: current.unit_type(),
            });
        }
        self.raw.set_primitive(PrimitiveValue::numeric(value, unit));
        self.refresh();
        Ok(())
    }

    /// Replace the text of a string, URI, identifier, or attribute value,
    /// keeping its type.
    ///
    /// # Errors
    ///
    /// [`ValueError::KindMismatch`] for lists and [`ValueError::NotAString`]
    /// for other scalars.
    pub fn set_string_value(&mut self, text: &str) -> Result<(), ValueError> {
        let replaced = match self.primitive()? {
            PrimitiveValue::String(_) => PrimitiveValue::String(text.to_string()),
            PrimitiveValue::Uri(_) => PrimitiveValue::Uri(text.to_string()),
            PrimitiveValue::Ident(_) => PrimitiveValue::Ident(text.to_string()),
            PrimitiveValue::Attr(_) => PrimitiveValue::Attr(text.to_string()),
            other => {
                return Err(ValueError::NotAString {
                    unit: other.unit_type(),
                });
            }
        };
        self.raw.set_primitive(replaced);
        self.refresh();
        Ok(())
    }

    /// Replace the value by classifying `text`.
    ///
    /// # Errors
    ///
    /// Returns the classifier's error and leaves the value untouched when
    /// `text` is invalid.
    pub fn set_css_text(&mut self, text: &str) -> Result<(), ValueError> {
        self.raw.set_css_text(text)?;
        self.refresh();
        Ok(())
    }

    /// Re-read kind, unit, and state from the raw value.
    fn refresh(&mut self) {
        self.kind = self.raw.kind();
        self.specified_unit = self.raw.primitive().map(|primitive| primitive.unit_type());
        self.state = classify(&self.raw, &self.config);
    }

    fn require_scalar(&self) -> Result<(), ValueError> {
        if self.is_scalar() {
            Ok(())
        } else {
            Err(ValueError::KindMismatch {
                expected: ValueKind::Scalar,
            })
        }
    }

    fn primitive(&self) -> Result<PrimitiveValue, ValueError> {
        self.raw.primitive().ok_or(ValueError::KindMismatch {
            expected: ValueKind::Scalar,
        })
    }
}

/// Work out the computation state of a raw value.
///
/// Absolute lengths become pixels (snapped per `config`). Other non-relative
/// numbers keep their own unit.
fn classify(raw: &SharedValue, config: &ResolverConfig) -> Computation {
    let Some(PrimitiveValue::Numeric { value, unit }) = raw.primitive() else {
        return Computation::NonNumeric;
    };
    if unit.is_relative() {
        return Computation::Relative { value, unit };
    }
    match to_px(value, &unit) {
        Ok(px) => Computation::Absolute {
            value: config.snap(px),
            unit: UnitType::PX,
        },
        Err(_) => Computation::Absolute { value, unit },
    }
}

impl fmt::Debug for DerivedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedValue")
            .field("raw", &self.raw)
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("inherited", &self.inherited.is_some())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for DerivedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}
