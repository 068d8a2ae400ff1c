// crates/clipforge-core/src/collaborators.rs
//
// Seams to the two external executables the service drives: the metadata
// prober and the transcoder. clipforge-media provides the ffprobe/ffmpeg
// CLI implementations; the integration suite substitutes mocks.

use std::fmt;
use std::path::Path;

use crate::edit::plan::EditPlan;
use crate::project::Metadata;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeError(pub String);

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "probe failed: {}", self.0)
    }
}

impl std::error::Error for ProbeError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscodeError(pub String);

impl fmt::Display for TranscodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transcode failed: {}", self.0)
    }
}

impl std::error::Error for TranscodeError {}

/// Synchronous media inspection, invoked at upload time and after each
/// successful edit.
pub trait Prober: Send + Sync {
    fn probe(&self, path: &Path) -> Result<Metadata, ProbeError>;
}

/// Executes a validated edit plan against `input`, writing the result to
/// `output`. Blocking; the orchestrator runs it on a background thread.
pub trait Transcoder: Send + Sync {
    fn run(&self, input: &Path, plan: &EditPlan, output: &Path) -> Result<(), TranscodeError>;
}
