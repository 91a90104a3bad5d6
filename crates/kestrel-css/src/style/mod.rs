//! Style contexts and the property registry
//!
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/)

mod context;
mod property;

pub use context::{CalculatedStyle, EmptyStyle, StyleContext};
pub use property::{Axis, PropertyName};
