// crates/clipforge-media/src/probe.rs
//
// Metadata probing via the ffprobe CLI — JSON output parsed with serde.
// Numeric fields arrive as strings in ffprobe's JSON (nb_frames, size,
// bit_rate, duration), hence the string-typed raw structs below.

use std::path::Path;
use std::process::Command;

use log::warn;
use serde::Deserialize;

use clipforge_core::{Metadata, ProbeError, Prober};

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    #[serde(default)]
    format: FfprobeFormat,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type:      Option<String>,
    codec_name:      Option<String>,
    codec_long_name: Option<String>,
    width:           Option<u32>,
    height:          Option<u32>,
    r_frame_rate:    Option<String>,
    nb_frames:       Option<String>,
    duration:        Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeFormat {
    format_name: Option<String>,
    duration:    Option<String>,
    size:        Option<String>,
    bit_rate:    Option<String>,
}

/// Convert a raw ffprobe JSON document into the canonical Metadata.
/// Separated from the subprocess call so it can be unit-tested on fixtures.
pub fn metadata_from_json(raw: &str) -> Result<Metadata, ProbeError> {
    let parsed: FfprobeOutput =
        serde_json::from_str(raw).map_err(|e| ProbeError(format!("unparsable ffprobe output: {e}")))?;

    let video = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| ProbeError("no video stream".into()))?;

    let width  = video.width.unwrap_or(0);
    let height = video.height.unwrap_or(0);
    if width == 0 || height == 0 {
        return Err(ProbeError("video stream has no dimensions".into()));
    }

    // Container duration is the authority; fall back to the stream's.
    let duration = parsed
        .format
        .duration
        .as_deref()
        .or(video.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);
    if duration <= 0.0 {
        return Err(ProbeError("duration unknown".into()));
    }

    let frame_rate = video.r_frame_rate.clone().unwrap_or_else(|| "0/1".into());
    let frame_count = video
        .nb_frames
        .as_deref()
        .and_then(|n| n.parse::<u64>().ok())
        .unwrap_or_else(|| (duration * frames_per_second(&frame_rate)).round() as u64);

    Ok(Metadata {
        width,
        height,
        duration,
        codec:           video.codec_name.clone().unwrap_or_default(),
        codec_long_name: video.codec_long_name.clone().unwrap_or_default(),
        bit_rate:        parse_u64(parsed.format.bit_rate.as_deref()),
        frame_rate,
        frame_count,
        format_name:     parsed.format.format_name.clone().unwrap_or_default(),
        file_size:       parse_u64(parsed.format.size.as_deref()),
    })
}

fn parse_u64(value: Option<&str>) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

/// Evaluate a rational like "25/1". 0.0 when malformed or zero-denominator.
fn frames_per_second(rational: &str) -> f64 {
    let mut parts = rational.splitn(2, '/');
    let num: f64 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0.0);
    let den: f64 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(1.0);
    if den == 0.0 { 0.0 } else { num / den }
}

/// Prober backed by the ffprobe executable.
pub struct FfprobeProber;

impl Prober for FfprobeProber {
    fn probe(&self, path: &Path) -> Result<Metadata, ProbeError> {
        let result = Command::new("ffprobe")
            .args([
                "-v", "error",
                "-print_format", "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .output();

        match result {
            Ok(out) if out.status.success() => {
                metadata_from_json(&String::from_utf8_lossy(&out.stdout))
            }
            Ok(out) => {
                let tail = String::from_utf8_lossy(&out.stderr);
                let tail = tail.lines().last().unwrap_or("");
                warn!("[probe] ffprobe failed for {}: {tail}", path.display());
                Err(ProbeError(tail.to_string()))
            }
            Err(e) => Err(ProbeError(format!("ffprobe spawn: {e}"))),
        }
    }
}
