//! Resolver configuration.

use serde::{Deserialize, Serialize};

use crate::values::{DEFAULT_FONT_SIZE_PX, snap_px};

/// Knobs that change how values are computed.
///
/// Every field has a default, so a partial JSON object deserializes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResolverConfig {
    /// Font size of the root style, and the fallback when a parent style has
    /// no `font-size`.
    pub default_font_size_px: f64,
    /// Floor every computed length to a whole pixel.
    pub snap_to_whole_pixels: bool,
    /// Trim whitespace around the segments returned by
    /// [`crate::DerivedValue::as_string_array`].
    pub trim_list_segments: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_font_size_px: DEFAULT_FONT_SIZE_PX,
            snap_to_whole_pixels: true,
            trim_list_segments: true,
        }
    }
}

impl ResolverConfig {
    /// Apply pixel snapping, if enabled.
    #[must_use]
    pub fn snap(&self, px: f64) -> f64 {
        if self.snap_to_whole_pixels {
            snap_px(px)
        } else {
            px
        }
    }
}
