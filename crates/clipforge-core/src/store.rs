// crates/clipforge-core/src/store.rs
//
// Document-store seam. The service ships an in-memory implementation
// (clipforge-server/src/store.rs); anything that can apply a patch set
// atomically per record can stand behind this trait.

use std::fmt;

use uuid::Uuid;

use crate::patch::{PatchError, ProjectPatch};
use crate::project::Project;

#[derive(Clone, Debug, PartialEq)]
pub enum StoreError {
    /// Unknown id. Also what an in-flight job sees after its project was
    /// deleted — the signal to discard the result quietly.
    NotFound,
    /// A patch in the set was refused; nothing was written.
    Rejected(PatchError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "project not found"),
            StoreError::Rejected(e) => write!(f, "patch rejected: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<PatchError> for StoreError {
    fn from(e: PatchError) -> Self {
        StoreError::Rejected(e)
    }
}

pub trait ProjectStore: Send + Sync {
    /// Insert a freshly created record.
    fn create(&self, project: Project);

    fn get(&self, id: Uuid) -> Option<Project>;

    /// Apply `patches` to the record atomically: either all of them are
    /// visible afterwards or none. Returns the updated record.
    fn apply(&self, id: Uuid, patches: &[ProjectPatch]) -> Result<Project, StoreError>;

    /// Remove the record. In-flight jobs are not cancelled; their completion
    /// patches will get `NotFound` and be discarded.
    fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
