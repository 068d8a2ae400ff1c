// crates/clipforge-core/src/edit/plan.rs
//
// The normalized edit plan: validated operations in the order the
// transcoder must apply them. Crop/scale coordinates are always expressed
// against the pre-rotation frame, so rotation comes last.

use serde::Serialize;

use crate::project::Metadata;

/// One step of the transcode pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditStep {
    Trim { start: f64, end: f64 },
    Crop { x: u32, y: u32, width: u32, height: u32 },
    /// Height was derived by the validator (aspect-preserving, rounded even).
    Scale { width: u32, height: u32 },
    /// One of 90, 180, 270. A canonical 0 produces no step at all.
    Rotate { degrees: u32 },
}

/// Ordered sequence of steps: trim → crop → scale → rotate.
/// Only constructed by `validate`, so holding one implies the request was
/// geometrically and temporally consistent with some metadata snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EditPlan {
    steps: Vec<EditStep>,
}

impl EditPlan {
    pub(crate) fn from_steps(steps: Vec<EditStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[EditStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The metadata a successful run of this plan is expected to produce,
    /// given the metadata it was validated against. The orchestrator still
    /// re-probes the real output; this projection backs tests and mock
    /// collaborators.
    pub fn projected(&self, current: &Metadata) -> Metadata {
        let mut out = current.clone();
        for step in &self.steps {
            match *step {
                EditStep::Trim { start, end } => {
                    let ratio = (end - start) / out.duration;
                    out.frame_count = (out.frame_count as f64 * ratio).round() as u64;
                    out.file_size   = (out.file_size as f64 * ratio).round() as u64;
                    out.duration    = end - start;
                }
                EditStep::Crop { width, height, .. } => {
                    out.width  = width;
                    out.height = height;
                }
                EditStep::Scale { width, height } => {
                    out.width  = width;
                    out.height = height;
                }
                EditStep::Rotate { degrees } => {
                    if degrees == 90 || degrees == 270 {
                        std::mem::swap(&mut out.width, &mut out.height);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sample_metadata;

    #[test]
    fn trim_projection_shortens_duration_and_frames() {
        let plan = EditPlan::from_steps(vec![EditStep::Trim { start: 2.0, end: 6.0 }]);
        let out = plan.projected(&sample_metadata());
        assert_eq!(out.duration, 4.0);
        assert_eq!(out.frame_count, 100); // 375 * 4/15
        assert_eq!(out.width, 1280);
    }

    #[test]
    fn quarter_rotation_swaps_dimensions() {
        let plan = EditPlan::from_steps(vec![EditStep::Rotate { degrees: 90 }]);
        let out = plan.projected(&sample_metadata());
        assert_eq!((out.width, out.height), (720, 1280));

        let plan = EditPlan::from_steps(vec![EditStep::Rotate { degrees: 180 }]);
        let out = plan.projected(&sample_metadata());
        assert_eq!((out.width, out.height), (1280, 720));
    }

    #[test]
    fn crop_then_scale_projects_post_crop_frame() {
        let plan = EditPlan::from_steps(vec![
            EditStep::Crop { x: 0, y: 0, width: 400, height: 400 },
            EditStep::Scale { width: 640, height: 640 },
        ]);
        let out = plan.projected(&sample_metadata());
        assert_eq!((out.width, out.height), (640, 640));
        assert_eq!(out.duration, 15.0);
    }
}
