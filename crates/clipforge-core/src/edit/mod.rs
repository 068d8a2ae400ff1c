// crates/clipforge-core/src/edit/mod.rs
//
// Raw edit request as it arrives over the wire: any subset of
// trim / rotate / crop / scale. Validation (validate.rs) turns it into an
// ordered EditPlan (plan.rs) or a field-scoped error mapping.

use serde::Deserialize;

pub mod plan;
pub mod validate;

/// Temporal slice, in seconds against the current stored duration.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Trim {
    pub start: f64,
    pub end:   f64,
}

/// Pixel rectangle against the current stored frame (pre-rotation space).
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Crop {
    pub x:      u32,
    pub y:      u32,
    pub width:  u32,
    pub height: u32,
}

/// A client's edit request. All operations are optional; an entirely empty
/// request is a validation error, not a no-op.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditRequest {
    pub trim:   Option<Trim>,
    /// Degrees, canonicalized modulo 360 by the validator.
    pub rotate: Option<i64>,
    pub crop:   Option<Crop>,
    /// Target width; height is derived preserving the aspect ratio of the
    /// frame being scaled (post-crop when crop is also requested).
    pub scale:  Option<i64>,
}

impl EditRequest {
    pub fn is_empty(&self) -> bool {
        self.trim.is_none()
            && self.rotate.is_none()
            && self.crop.is_none()
            && self.scale.is_none()
    }
}
