// crates/clipforge-core/src/edit/validate.rs
//
// Pure decision logic: given the project's current metadata and a raw edit
// request, produce a normalized EditPlan or a field-scoped error mapping.
// No side effects, no state mutation.
//
// Within one operation the first violation wins (fields are checked in
// request order); across operations all violations are reported together.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::EditLimits;
use crate::edit::plan::{EditPlan, EditStep};
use crate::edit::{Crop, EditRequest, Trim};
use crate::project::Metadata;

/// A trimmed clip shorter than this is refused.
pub const MIN_TRIM_SECONDS: f64 = 2.0;

/// Upscaling is only permitted for sources narrower than this. The value is
/// part of the client-facing error message, so it is a constant rather than
/// configuration.
pub const INTERPOLATION_SOURCE_LIMIT: u32 = 1280;

type FieldErrors = BTreeMap<&'static str, Vec<String>>;

/// Mapping from operation name to an ordered list of per-field reason
/// objects, e.g. `{"trim": [{"start": ["must be less than 'end' value"]}]}`.
/// Serializes transparently as the inner map.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<FieldErrors>>);

impl ValidationErrors {
    fn push(&mut self, op: &'static str, field: &'static str, reason: impl Into<String>) {
        let mut fields = FieldErrors::new();
        fields.insert(field, vec![reason.into()]);
        self.0.entry(op).or_default().push(fields);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Validate `request` against `metadata`, producing the ordered pipeline
/// (trim → crop → scale → rotate) on acceptance.
///
/// Composition rule: crop is evaluated against the current stored metadata;
/// scale's "effective width" is the post-crop width when crop is present.
/// Trim and rotate never enter the dimension math.
pub fn validate(
    metadata: &Metadata,
    request:  &EditRequest,
    limits:   &EditLimits,
) -> Result<EditPlan, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if request.is_empty() {
        errors.push("edit", "operations", "at least one of trim, rotate, crop or scale is required");
        return Err(errors);
    }

    let trim_step   = request.trim.and_then(|t| check_trim(metadata, t, &mut errors));
    let rotate_step = request.rotate.and_then(|d| check_rotate(d, &mut errors));
    let crop_step   = request.crop.and_then(|c| check_crop(metadata, c, limits, &mut errors));
    // Scale is evaluated against the requested crop dimensions even when the
    // crop itself failed, so both operations can report in one response.
    let scale_step  = request.scale.and_then(|w| {
        let effective = request
            .crop
            .map(|c| (c.width, c.height))
            .unwrap_or((metadata.width, metadata.height));
        check_scale(w, effective, limits, &mut errors)
    });

    if !errors.is_empty() {
        return Err(errors);
    }

    let steps = [trim_step, crop_step, scale_step, rotate_step]
        .into_iter()
        .flatten()
        .collect();
    Ok(EditPlan::from_steps(steps))
}

fn check_trim(metadata: &Metadata, trim: Trim, errors: &mut ValidationErrors) -> Option<EditStep> {
    if trim.start >= trim.end {
        errors.push("trim", "start", "must be less than 'end' value");
    } else if trim.end - trim.start < MIN_TRIM_SECONDS {
        errors.push("trim", "start", "trimmed video must be at least 2 seconds");
    } else if trim.end > metadata.duration {
        errors.push("trim", "end", "outside of initial video's length");
    } else if trim.start == 0.0 && trim.end == metadata.duration {
        errors.push("trim", "end", "trim is duplicating an entire video");
    } else {
        return Some(EditStep::Trim { start: trim.start, end: trim.end });
    }
    None
}

fn check_rotate(degrees: i64, errors: &mut ValidationErrors) -> Option<EditStep> {
    let canonical = degrees.rem_euclid(360) as u32;
    match canonical {
        90 | 180 | 270 => Some(EditStep::Rotate { degrees: canonical }),
        // A full turn is legal but produces no pipeline step.
        0 => None,
        _ => {
            errors.push("rotate", "degrees", "must be one of 0, 90, 180 or 270");
            None
        }
    }
}

fn check_crop(
    metadata: &Metadata,
    crop:     Crop,
    limits:   &EditLimits,
    errors:   &mut ValidationErrors,
) -> Option<EditStep> {
    if metadata.width.saturating_sub(crop.x) < limits.min_crop_width {
        errors.push("crop", "x", "less than minimum allowed crop width");
    } else if metadata.height.saturating_sub(crop.y) < limits.min_crop_height {
        errors.push("crop", "y", "less than minimum allowed crop height");
    } else if crop.x.saturating_add(crop.width) > metadata.width {
        errors.push("crop", "width", "crop's frame is outside a video's frame");
    } else if crop.y.saturating_add(crop.height) > metadata.height {
        errors.push("crop", "height", "crop's frame is outside a video's frame");
    } else {
        return Some(EditStep::Crop {
            x:      crop.x,
            y:      crop.y,
            width:  crop.width,
            height: crop.height,
        });
    }
    None
}

fn check_scale(
    target:    i64,
    effective: (u32, u32),
    limits:    &EditLimits,
    errors:    &mut ValidationErrors,
) -> Option<EditStep> {
    let (eff_w, eff_h) = effective;

    if target < limits.min_video_width as i64 {
        errors.push("scale", "scale", format!("min value is {}", limits.min_video_width));
        return None;
    }
    if target > limits.max_video_width as i64 {
        errors.push("scale", "scale", format!("max value is {}", limits.max_video_width));
        return None;
    }

    let target = target as u32;
    if target == eff_w {
        errors.push("scale", "scale", "video or crop option already has exactly the same width");
        return None;
    }
    if target > eff_w {
        // The outright-disallowed check overrides the width-threshold check.
        if !limits.allow_interpolation {
            errors.push("scale", "scale", "interpolation of pixels is not allowed");
            return None;
        }
        if eff_w >= INTERPOLATION_SOURCE_LIMIT {
            errors.push(
                "scale",
                "scale",
                "interpolation is permitted only for videos which have width less than 1280px",
            );
            return None;
        }
    }

    // Aspect-preserving height against the frame being scaled, rounded to an
    // even pixel count (codec requirement).
    let height = ((target as f64 * eff_h as f64 / eff_w.max(1) as f64).round() as u32).max(2) & !1;
    Some(EditStep::Scale { width: target, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sample_metadata;
    use serde_json::json;

    fn limits() -> EditLimits {
        EditLimits::default()
    }

    fn errors_json(result: Result<EditPlan, ValidationErrors>) -> serde_json::Value {
        serde_json::to_value(result.unwrap_err()).unwrap()
    }

    fn trim(start: f64, end: f64) -> EditRequest {
        EditRequest { trim: Some(Trim { start, end }), ..Default::default() }
    }

    fn crop(x: u32, y: u32, width: u32, height: u32) -> EditRequest {
        EditRequest { crop: Some(Crop { x, y, width, height }), ..Default::default() }
    }

    fn scale(width: i64) -> EditRequest {
        EditRequest { scale: Some(width), ..Default::default() }
    }

    // ── trim ─────────────────────────────────────────────────────────────

    #[test]
    fn trim_start_must_precede_end() {
        let got = errors_json(validate(&sample_metadata(), &trim(6.0, 2.0), &limits()));
        assert_eq!(got, json!({"trim": [{"start": ["must be less than 'end' value"]}]}));
    }

    #[test]
    fn trim_shorter_than_two_seconds_is_refused() {
        let got = errors_json(validate(&sample_metadata(), &trim(0.0, 1.0), &limits()));
        assert_eq!(got, json!({"trim": [{"start": ["trimmed video must be at least 2 seconds"]}]}));
    }

    #[test]
    fn trim_end_outside_duration_is_refused() {
        let got = errors_json(validate(&sample_metadata(), &trim(10.0, 20.0), &limits()));
        assert_eq!(got, json!({"trim": [{"end": ["outside of initial video's length"]}]}));
    }

    #[test]
    fn trim_spanning_whole_video_is_refused() {
        let got = errors_json(validate(&sample_metadata(), &trim(0.0, 15.0), &limits()));
        assert_eq!(got, json!({"trim": [{"end": ["trim is duplicating an entire video"]}]}));
    }

    #[test]
    fn valid_trim_yields_single_step() {
        let plan = validate(&sample_metadata(), &trim(2.0, 6.0), &limits()).unwrap();
        assert_eq!(plan.steps(), &[EditStep::Trim { start: 2.0, end: 6.0 }]);
    }

    // ── rotate ───────────────────────────────────────────────────────────

    #[test]
    fn rotate_rejects_values_off_the_quarter_grid() {
        for degrees in [70, 45, -17, 361] {
            let req = EditRequest { rotate: Some(degrees), ..Default::default() };
            let got = errors_json(validate(&sample_metadata(), &req, &limits()));
            assert_eq!(got, json!({"rotate": [{"degrees": ["must be one of 0, 90, 180 or 270"]}]}));
        }
    }

    #[test]
    fn rotate_canonicalizes_modulo_360() {
        for (raw, canonical) in [(90, 90), (450, 90), (-90, 270), (180, 180), (-180, 180)] {
            let req = EditRequest { rotate: Some(raw), ..Default::default() };
            let plan = validate(&sample_metadata(), &req, &limits()).unwrap();
            assert_eq!(plan.steps(), &[EditStep::Rotate { degrees: canonical }]);
        }
    }

    #[test]
    fn rotate_by_full_turn_is_legal_and_produces_no_step() {
        let req = EditRequest { rotate: Some(360), ..Default::default() };
        let plan = validate(&sample_metadata(), &req, &limits()).unwrap();
        assert!(plan.is_empty());
    }

    // ── crop ─────────────────────────────────────────────────────────────

    #[test]
    fn crop_x_too_close_to_right_edge_is_refused() {
        let got = errors_json(validate(&sample_metadata(), &crop(2000, 0, 640, 480), &limits()));
        assert_eq!(got, json!({"crop": [{"x": ["less than minimum allowed crop width"]}]}));
    }

    #[test]
    fn crop_y_too_close_to_bottom_edge_is_refused() {
        let got = errors_json(validate(&sample_metadata(), &crop(0, 1000, 640, 480), &limits()));
        assert_eq!(got, json!({"crop": [{"y": ["less than minimum allowed crop height"]}]}));
    }

    #[test]
    fn crop_width_overflowing_frame_is_refused() {
        let got = errors_json(validate(&sample_metadata(), &crop(300, 0, 1000, 480), &limits()));
        assert_eq!(got, json!({"crop": [{"width": ["crop's frame is outside a video's frame"]}]}));
    }

    #[test]
    fn crop_height_overflowing_frame_is_refused() {
        let got = errors_json(validate(&sample_metadata(), &crop(0, 200, 640, 600), &limits()));
        assert_eq!(got, json!({"crop": [{"height": ["crop's frame is outside a video's frame"]}]}));
    }

    #[test]
    fn crop_fully_inside_frame_is_accepted() {
        let plan = validate(&sample_metadata(), &crop(0, 0, 640, 480), &limits()).unwrap();
        assert_eq!(plan.steps(), &[EditStep::Crop { x: 0, y: 0, width: 640, height: 480 }]);
    }

    // ── scale ────────────────────────────────────────────────────────────

    #[test]
    fn scale_below_minimum_is_refused() {
        let got = errors_json(validate(&sample_metadata(), &scale(0), &limits()));
        assert_eq!(got, json!({"scale": [{"scale": ["min value is 240"]}]}));
    }

    #[test]
    fn scale_above_maximum_is_refused() {
        let got = errors_json(validate(&sample_metadata(), &scale(5000), &limits()));
        assert_eq!(got, json!({"scale": [{"scale": ["max value is 4096"]}]}));
    }

    #[test]
    fn scale_to_current_width_is_refused_under_the_scale_key() {
        let got = errors_json(validate(&sample_metadata(), &scale(1280), &limits()));
        assert_eq!(
            got,
            json!({"scale": [{"scale": ["video or crop option already has exactly the same width"]}]}),
        );
    }

    #[test]
    fn upscale_from_wide_source_is_refused() {
        let got = errors_json(validate(&sample_metadata(), &scale(1440), &limits()));
        assert_eq!(
            got,
            json!({"scale": [{"scale": [
                "interpolation is permitted only for videos which have width less than 1280px"
            ]}]}),
        );
    }

    #[test]
    fn interpolation_flag_overrides_the_width_threshold() {
        let cfg = EditLimits { allow_interpolation: false, ..EditLimits::default() };
        let got = errors_json(validate(&sample_metadata(), &scale(1440), &cfg));
        assert_eq!(got, json!({"scale": [{"scale": ["interpolation of pixels is not allowed"]}]}));
    }

    #[test]
    fn downscale_derives_aspect_preserving_height() {
        let plan = validate(&sample_metadata(), &scale(640), &limits()).unwrap();
        assert_eq!(plan.steps(), &[EditStep::Scale { width: 640, height: 360 }]);
    }

    // ── composition ──────────────────────────────────────────────────────

    #[test]
    fn scale_equality_is_checked_against_post_crop_width() {
        let req = EditRequest {
            crop:  Some(Crop { x: 0, y: 0, width: 640, height: 480 }),
            scale: Some(640),
            ..Default::default()
        };
        let got = errors_json(validate(&sample_metadata(), &req, &limits()));
        assert_eq!(
            got,
            json!({"scale": [{"scale": ["video or crop option already has exactly the same width"]}]}),
        );
    }

    #[test]
    fn crop_and_scale_compose_in_pipeline_order() {
        let req = EditRequest {
            crop:  Some(Crop { x: 0, y: 0, width: 400, height: 400 }),
            scale: Some(640),
            ..Default::default()
        };
        let plan = validate(&sample_metadata(), &req, &limits()).unwrap();
        assert_eq!(
            plan.steps(),
            &[
                EditStep::Crop { x: 0, y: 0, width: 400, height: 400 },
                EditStep::Scale { width: 640, height: 640 },
            ],
        );
    }

    #[test]
    fn upscale_past_crop_width_is_interpolation_from_the_crop_frame() {
        // Post-crop width 400 < 1280, so upscaling to 800 is legal.
        let req = EditRequest {
            crop:  Some(Crop { x: 0, y: 0, width: 400, height: 400 }),
            scale: Some(800),
            ..Default::default()
        };
        let plan = validate(&sample_metadata(), &req, &limits()).unwrap();
        assert_eq!(plan.steps().last(), Some(&EditStep::Scale { width: 800, height: 800 }));
    }

    #[test]
    fn all_four_operations_assemble_in_execution_order() {
        let req = EditRequest {
            trim:   Some(Trim { start: 2.0, end: 6.0 }),
            rotate: Some(90),
            crop:   Some(Crop { x: 0, y: 0, width: 640, height: 480 }),
            scale:  Some(320),
        };
        let plan = validate(&sample_metadata(), &req, &limits()).unwrap();
        assert_eq!(
            plan.steps(),
            &[
                EditStep::Trim { start: 2.0, end: 6.0 },
                EditStep::Crop { x: 0, y: 0, width: 640, height: 480 },
                EditStep::Scale { width: 320, height: 240 },
                EditStep::Rotate { degrees: 90 },
            ],
        );
    }

    #[test]
    fn violations_across_operations_are_reported_together() {
        let req = EditRequest {
            trim: Some(Trim { start: 6.0, end: 2.0 }),
            crop: Some(Crop { x: 2000, y: 0, width: 640, height: 480 }),
            ..Default::default()
        };
        let got = errors_json(validate(&sample_metadata(), &req, &limits()));
        assert_eq!(
            got,
            json!({
                "trim": [{"start": ["must be less than 'end' value"]}],
                "crop": [{"x": ["less than minimum allowed crop width"]}],
            }),
        );
    }

    #[test]
    fn empty_request_is_a_validation_error() {
        let got = errors_json(validate(&sample_metadata(), &EditRequest::default(), &limits()));
        assert_eq!(
            got,
            json!({"edit": [{"operations": ["at least one of trim, rotate, crop or scale is required"]}]}),
        );
    }

    #[test]
    fn rejection_never_mutates_inputs() {
        let metadata = sample_metadata();
        let before = metadata.clone();
        let _ = validate(&metadata, &trim(6.0, 2.0), &limits());
        assert_eq!(metadata, before);
    }
}
