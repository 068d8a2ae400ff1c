// crates/clipforge-core/src/config.rs
//
// Validation limits, loaded once at service startup and passed by reference
// into `edit::validate`. The 1280 px interpolation source limit is NOT here:
// it appears verbatim in a client-facing error message, so it lives as a
// constant next to the check (edit/validate.rs).

use serde::Deserialize;

/// Geometric limits for edit requests.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct EditLimits {
    /// Minimum width a crop region may leave between `x` and the right edge.
    pub min_crop_width: u32,
    /// Minimum height a crop region may leave between `y` and the bottom edge.
    pub min_crop_height: u32,
    /// Smallest accepted scale target width.
    pub min_video_width: u32,
    /// Largest accepted scale target width.
    pub max_video_width: u32,
    /// When false, any upscale is refused outright regardless of source width.
    pub allow_interpolation: bool,
}

impl Default for EditLimits {
    fn default() -> Self {
        Self {
            min_crop_width:      100,
            min_crop_height:     100,
            min_video_width:     240,
            max_video_width:     4096,
            allow_interpolation: true,
        }
    }
}
