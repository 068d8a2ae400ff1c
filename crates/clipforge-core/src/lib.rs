// crates/clipforge-core/src/lib.rs
//
// Pure project data and decision logic — no I/O, no subprocesses, no async.
// Serializable via serde. Used by clipforge-media and clipforge-server.
//
// To add a new edit operation:
//   1. Add the request field in edit/mod.rs
//   2. Add its checks in edit/validate.rs (first violation wins per op)
//   3. Add the pipeline step in edit/plan.rs (and its projection)

pub mod collaborators;
pub mod config;
pub mod edit;
pub mod patch;
pub mod project;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export the main public API so downstream imports are simple.
pub use collaborators::{ProbeError, Prober, TranscodeError, Transcoder};
pub use config::EditLimits;
pub use edit::plan::{EditPlan, EditStep};
pub use edit::validate::{validate, ValidationErrors};
pub use edit::{Crop, EditRequest, Trim};
pub use patch::{PatchError, ProjectPatch};
pub use project::{Metadata, ProcessingFlags, Project, Thumbnails};
pub use state::JobKind;
pub use store::{ProjectStore, StoreError};
