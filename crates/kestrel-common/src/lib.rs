//! Common utilities for the Kestrel style engine.
//!
//! This crate provides shared infrastructure used by all Kestrel components:
//! - **Warning System** - deduplicated, colored diagnostics for conditions the
//!   style pipeline recovers from (unresolvable percentages, missing parent
//!   properties, unknown units)

pub mod warning;
