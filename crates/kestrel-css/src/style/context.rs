//! Style contexts
//!
//! [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
//!
//! "Inheritance propagates property values from parent elements to their
//! children."

use std::collections::HashMap;
use std::rc::Rc;

use kestrel_common::warning::warn_once;

use super::property::PropertyName;
use crate::config::ResolverConfig;
use crate::derived::{ContainingBlock, DerivedValue, Resolution};
use crate::error::ValueError;
use crate::values::{ParsedValue, PrimitiveValue, SharedValue, Unit};

/// A computed style that relative values resolve against.
pub trait StyleContext {
    /// The computed value of `property`, if the style has one.
    fn property_by_name(&self, property: &PropertyName) -> Option<&DerivedValue>;
}

/// A style with no properties.
///
/// Stands in for the parent of the root element.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyStyle;

impl StyleContext for EmptyStyle {
    fn property_by_name(&self, _property: &PropertyName) -> Option<&DerivedValue> {
        None
    }
}

/// The computed style of one element.
///
/// Maps property names to derived values and links to the parent element's
/// style, which relative values and `inherit` resolve against.
#[derive(Debug)]
pub struct CalculatedStyle {
    parent: Option<Rc<CalculatedStyle>>,
    properties: HashMap<PropertyName, DerivedValue>,
    config: ResolverConfig,
}

impl CalculatedStyle {
    /// [§ 7.1 Root Element](https://www.w3.org/TR/css-cascade-4/#inheriting)
    ///
    /// "The root element, which has no parent element, inherits the initial
    /// value of the property."
    ///
    /// Seeds `font-size` with the configured default.
    #[must_use]
    pub fn root(config: ResolverConfig) -> Self {
        let font_size = SharedValue::new(ParsedValue::Single(PrimitiveValue::numeric(
            config.default_font_size_px,
            Unit::Px,
        )));
        let mut properties = HashMap::new();
        let _ = properties.insert(
            PropertyName::FontSize,
            DerivedValue::with_config(font_size, None, config),
        );
        Self {
            parent: None,
            properties,
            config,
        }
    }

    /// An empty style whose values resolve against `parent`.
    #[must_use]
    pub fn child_of(parent: &Rc<Self>) -> Self {
        Self {
            parent: Some(Rc::clone(parent)),
            properties: HashMap::new(),
            config: parent.config,
        }
    }

    /// The parent style, if this is not the root.
    #[must_use]
    pub fn parent(&self) -> Option<&Rc<Self>> {
        self.parent.as_ref()
    }

    /// The configuration values of this style are computed with.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Compute `property: text` and store the result.
    ///
    /// STEP 1: Classify the value text.
    /// STEP 2: If the value is `inherit`, take a copy of the parent's value.
    ///         The copy shares the parent's raw value.
    /// STEP 3: Resolve relative values against the parent style.
    ///
    /// # Errors
    ///
    /// Returns the classifier's error for invalid text and the resolver's
    /// error when a relative value cannot be computed. Nothing is stored on
    /// error.
    pub fn derive(
        &mut self,
        property: impl Into<PropertyName>,
        text: &str,
    ) -> Result<Resolution, ValueError> {
        let property = property.into();

        // STEP 1
        let raw = SharedValue::parse(text)?;
        let inherited = self
            .parent
            .as_ref()
            .map(|parent| Rc::clone(parent) as Rc<dyn StyleContext>);
        let mut value = DerivedValue::with_config(raw, inherited, self.config);

        let parent: &dyn StyleContext = match self.parent.as_deref() {
            Some(parent) => parent,
            None => &EmptyStyle,
        };

        // STEP 2
        if value.has_forced_inherit() {
            match parent.property_by_name(&property) {
                Some(inherited) => value = inherited.copy(),
                None => warn_once(
                    "CSS",
                    &format!("'{property}: inherit' has no parent value to inherit"),
                ),
            }
        }

        // STEP 3
        let resolution = if value.requires_computation() {
            value.compute_relative_unit(parent, &property)?
        } else {
            Resolution::Unchanged
        };

        let _ = self.properties.insert(property, value);
        Ok(resolution)
    }

    /// Store an already derived value.
    pub fn insert(&mut self, property: PropertyName, value: DerivedValue) -> Option<DerivedValue> {
        self.properties.insert(property, value)
    }

    /// The value of `property`, inherited from ancestors for inherited
    /// properties.
    #[must_use]
    pub fn get(&self, property: &PropertyName) -> Option<&DerivedValue> {
        self.property_by_name(property)
    }

    /// The value of `property` set on this style itself.
    pub fn get_mut(&mut self, property: &PropertyName) -> Option<&mut DerivedValue> {
        self.properties.get_mut(property)
    }

    /// Values still waiting for the containing block.
    pub fn pending(&self) -> impl Iterator<Item = (&PropertyName, &DerivedValue)> {
        self.properties
            .iter()
            .filter(|(_, value)| value.is_pending_layout())
    }

    /// [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS21/visudet.html#containing-block-details)
    ///
    /// Complete every pending percentage of this style against the
    /// containing block. Returns how many values were completed.
    ///
    /// # Errors
    ///
    /// Propagates the first binding error.
    pub fn bind_containing_block(&mut self, block: ContainingBlock) -> Result<usize, ValueError> {
        let mut bound = 0;
        for value in self.properties.values_mut() {
            if value.is_pending_layout() {
                let _ = value.bind_containing_block(block)?;
                bound += 1;
            }
        }
        Ok(bound)
    }
}

impl StyleContext for CalculatedStyle {
    fn property_by_name(&self, property: &PropertyName) -> Option<&DerivedValue> {
        if let Some(value) = self.properties.get(property) {
            return Some(value);
        }
        // [§ 7.2 Inherited Properties]
        // "...the value is inherited from the parent element."
        if property.is_inherited() {
            return self
                .parent
                .as_deref()
                .and_then(|parent| parent.property_by_name(property));
        }
        None
    }
}
