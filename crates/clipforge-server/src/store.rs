// crates/clipforge-server/src/store.rs
//
// In-memory ProjectStore. Patch sets are validated against a copy and
// swapped in under the lock, so concurrent writers (request handlers and
// job completion threads) never observe a partial write.

use std::collections::HashMap;

use parking_lot::Mutex;
use uuid::Uuid;

use clipforge_core::patch;
use clipforge_core::{Project, ProjectPatch, ProjectStore, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<Uuid, Project>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStore for MemoryStore {
    fn create(&self, project: Project) {
        self.records.lock().insert(project.id, project);
    }

    fn get(&self, id: Uuid) -> Option<Project> {
        self.records.lock().get(&id).cloned()
    }

    fn apply(&self, id: Uuid, patches: &[ProjectPatch]) -> Result<Project, StoreError> {
        let mut records = self.records.lock();
        let current = records.get(&id).ok_or(StoreError::NotFound)?;
        let updated = patch::apply_all(current, patches)?;
        records.insert(id, updated.clone());
        Ok(updated)
    }

    fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.records.lock().remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}
