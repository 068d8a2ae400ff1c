// crates/clipforge-media/src/transcode.rs
//
// Edit-plan execution via the ffmpeg CLI. The argument list is built by a
// pure function so pipeline ordering is unit-testable without running
// ffmpeg.
//
// Step mapping:
//   trim   → -ss {start} -to {end}   (input-seeked temporal slice)
//   crop   → crop=w:h:x:y
//   scale  → scale=w:h
//   rotate → transpose filters (90 cw, 270 ccw, 180 as two quarter turns)
//
// Filters are chained in plan order, so rotation always applies to the
// already-cropped/scaled frame — crop and scale coordinates stay in the
// pre-rotation space the validator reasoned about.

use std::path::Path;
use std::process::Command;

use log::warn;

use clipforge_core::{EditPlan, EditStep, TranscodeError, Transcoder};

/// Build the full ffmpeg argument list for `plan`.
pub fn plan_args(input: &Path, plan: &EditPlan, output: &Path) -> Vec<String> {
    let mut args: Vec<String> = vec!["-y".into(), "-v".into(), "error".into()];

    for step in plan.steps() {
        if let EditStep::Trim { start, end } = step {
            args.push("-ss".into());
            args.push(format!("{start}"));
            args.push("-to".into());
            args.push(format!("{end}"));
        }
    }

    args.push("-i".into());
    args.push(input.to_string_lossy().into_owned());

    let mut filters: Vec<String> = Vec::new();
    for step in plan.steps() {
        match *step {
            EditStep::Trim { .. } => {}
            EditStep::Crop { x, y, width, height } => {
                filters.push(format!("crop={width}:{height}:{x}:{y}"));
            }
            EditStep::Scale { width, height } => {
                filters.push(format!("scale={width}:{height}"));
            }
            EditStep::Rotate { degrees } => match degrees {
                90  => filters.push("transpose=1".into()),
                180 => {
                    filters.push("transpose=1".into());
                    filters.push("transpose=1".into());
                }
                270 => filters.push("transpose=2".into()),
                _   => {}
            },
        }
    }

    if !filters.is_empty() {
        args.push("-vf".into());
        args.push(filters.join(","));
    }

    args.push(output.to_string_lossy().into_owned());
    args
}

/// Transcoder backed by the ffmpeg executable.
pub struct FfmpegTranscoder;

impl Transcoder for FfmpegTranscoder {
    fn run(&self, input: &Path, plan: &EditPlan, output: &Path) -> Result<(), TranscodeError> {
        let args = plan_args(input, plan, output);
        let result = Command::new("ffmpeg").args(&args).output();

        match result {
            Ok(out) if out.status.success() => {
                // ffmpeg can exit 0 with an empty output on some malformed
                // inputs; treat that as failure rather than committing it.
                match std::fs::metadata(output) {
                    Ok(m) if m.len() > 0 => Ok(()),
                    _ => Err(TranscodeError("ffmpeg produced no output".into())),
                }
            }
            Ok(out) => {
                let tail = String::from_utf8_lossy(&out.stderr);
                let tail = tail.lines().last().unwrap_or("");
                warn!("[transcode] ffmpeg failed for {}: {tail}", input.display());
                Err(TranscodeError(tail.to_string()))
            }
            Err(e) => Err(TranscodeError(format!("ffmpeg spawn: {e}"))),
        }
    }
}
