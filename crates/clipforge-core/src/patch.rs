// crates/clipforge-core/src/patch.rs
//
// Typed store patches. Every mutation of a Project after creation is one of
// these, applied atomically (all-or-nothing) by the store under its lock —
// no ad-hoc field writes, no partial commits.

use std::fmt;

use crate::project::{Metadata, Project};
use crate::state::JobKind;

/// A named mutation of a Project record.
#[derive(Clone, Debug, PartialEq)]
pub enum ProjectPatch {
    /// Compare-and-swap acquisition of a processing flag: fails with
    /// `PatchError::Busy` when the flag is already set. This is the
    /// single-writer gate for video edits.
    Acquire(JobKind),
    /// Unconditionally clear a processing flag.
    Release(JobKind),
    /// Replace the probed metadata wholesale.
    SetMetadata(Metadata),
    /// Bump the lineage counter. Only ever increments.
    IncrementVersion,
    /// Set or clear the async-failure marker surfaced on the next GET.
    SetFailure(Option<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatchError {
    /// An `Acquire` found the flag already set.
    Busy(JobKind),
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::Busy(kind) => write!(f, "a {} job is already in flight", kind.as_str()),
        }
    }
}

impl std::error::Error for PatchError {}

/// Apply one patch in place.
pub fn apply(project: &mut Project, patch: &ProjectPatch) -> Result<(), PatchError> {
    match patch {
        ProjectPatch::Acquire(kind) => {
            if project.processing.get(*kind) {
                return Err(PatchError::Busy(*kind));
            }
            project.processing.set(*kind, true);
        }
        ProjectPatch::Release(kind) => project.processing.set(*kind, false),
        ProjectPatch::SetMetadata(metadata) => project.metadata = metadata.clone(),
        ProjectPatch::IncrementVersion => project.version += 1,
        ProjectPatch::SetFailure(reason) => project.last_error = reason.clone(),
    }
    Ok(())
}

/// Apply a patch set to a copy of `project`, returning the updated record
/// only when every patch succeeded. The store swaps the copy in under its
/// lock, so a rejected set leaves the record untouched.
pub fn apply_all(project: &Project, patches: &[ProjectPatch]) -> Result<Project, PatchError> {
    let mut updated = project.clone();
    for patch in patches {
        apply(&mut updated, patch)?;
    }
    Ok(updated)
}
