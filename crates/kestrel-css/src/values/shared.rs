//! Shared, mutable handle to a parsed value.
//!
//! The cascade and every derived value built from one declaration hold the
//! same handle. Writing through any holder (resolving a relative length,
//! calling a setter) is visible to all of them. The handle is `!Send`, so the
//! sharing never crosses threads.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::parse::parse_value;
use super::primitive::{ParsedValue, PrimitiveValue, ValueKind};
use crate::error::ValueError;

#[derive(Debug)]
struct RawValue {
    /// The text as last written. Classified values keep the author's
    /// spelling (`#F00`, `1.50em`); typed writes re-serialize.
    text: String,
    value: ParsedValue,
}

/// A reference-counted handle to one parsed value.
///
/// Cloning the handle does not copy the value.
#[derive(Clone)]
pub struct SharedValue(Rc<RefCell<RawValue>>);

impl SharedValue {
    /// Classify `text` and wrap the result.
    ///
    /// # Errors
    ///
    /// Returns the classifier's error when `text` is not a valid value.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let value = parse_value(text)?;
        Ok(Self::from_raw(text.trim().to_string(), value))
    }

    /// Wrap an already classified value; its text is the serialization.
    #[must_use]
    pub fn new(value: ParsedValue) -> Self {
        Self::from_raw(value.to_string(), value)
    }

    fn from_raw(text: String, value: ParsedValue) -> Self {
        Self(Rc::new(RefCell::new(RawValue { text, value })))
    }

    /// The value's current text.
    #[must_use]
    pub fn css_text(&self) -> String {
        self.0.borrow().text.clone()
    }

    /// A snapshot of the classified value.
    #[must_use]
    pub fn value(&self) -> ParsedValue {
        self.0.borrow().value.clone()
    }

    /// Scalar or list.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.0.borrow().value.kind()
    }

    /// A snapshot of the primitive, for scalar values.
    #[must_use]
    pub fn primitive(&self) -> Option<PrimitiveValue> {
        self.0.borrow().value.as_primitive().cloned()
    }

    /// The items of a list value; a scalar yields itself.
    #[must_use]
    pub fn items(&self) -> Vec<PrimitiveValue> {
        match &self.0.borrow().value {
            ParsedValue::Single(primitive) => vec![primitive.clone()],
            ParsedValue::List { items, .. } => items.clone(),
        }
    }

    /// Replace the value by classifying `text`.
    ///
    /// # Errors
    ///
    /// Returns the classifier's error and leaves the value untouched when
    /// `text` is not a valid value.
    pub fn set_css_text(&self, text: &str) -> Result<(), ValueError> {
        let value = parse_value(text)?;
        let mut raw = self.0.borrow_mut();
        raw.text = text.trim().to_string();
        raw.value = value;
        Ok(())
    }

    /// Replace the value with a single primitive, re-serializing the text.
    pub fn set_primitive(&self, primitive: PrimitiveValue) {
        let mut raw = self.0.borrow_mut();
        raw.text = primitive.to_string();
        raw.value = ParsedValue::Single(primitive);
    }

    /// Whether both handles point at the same value.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedValue").field(&self.0.borrow().text).finish()
    }
}

impl fmt::Display for SharedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.borrow().text)
    }
}
