// crates/clipforge-server/src/orchestrator.rs
//
// Turns an accepted edit plan into one background job: transcode the stored
// file, re-probe the output, commit metadata + version atomically, release
// the video flag. Submission returns immediately — the HTTP response is
// "accepted/processing", never "done".
//
// The video flag is acquired compare-and-swap style at submission and is
// guaranteed to be released on every exit path: the job thread holds a
// FlagLease whose Drop releases it even when a collaborator panics.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{info, warn};
use uuid::Uuid;

use clipforge_core::{
    EditPlan, JobKind, Metadata, Prober, Project, ProjectPatch, ProjectStore, StoreError,
    Transcoder,
};

/// Terminal result of one edit job, published on the outcome channel.
/// The service logs these; the integration suite uses them to synchronize.
#[derive(Clone, Debug, PartialEq)]
pub enum JobOutcome {
    Committed { project: Uuid, version: u64 },
    Failed    { project: Uuid, reason: String },
    /// The project was deleted while the job was in flight; the result was
    /// thrown away without error propagation.
    Discarded { project: Uuid },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// A video job is already in flight — acknowledged but deferred.
    Busy,
    NotFound,
}

pub struct EditOrchestrator {
    store:       Arc<dyn ProjectStore>,
    prober:      Arc<dyn Prober>,
    transcoder:  Arc<dyn Transcoder>,
    storage_dir: PathBuf,
    outcome_tx:  Sender<JobOutcome>,
    outcome_rx:  Receiver<JobOutcome>,
}

impl EditOrchestrator {
    pub fn new(
        store:       Arc<dyn ProjectStore>,
        prober:      Arc<dyn Prober>,
        transcoder:  Arc<dyn Transcoder>,
        storage_dir: PathBuf,
    ) -> Self {
        let (outcome_tx, outcome_rx) = bounded(256);
        Self { store, prober, transcoder, storage_dir, outcome_tx, outcome_rx }
    }

    /// Receiver for job outcomes. Crossbeam channels are mpmc, so each
    /// clone competes for events — the service keeps exactly one drain.
    pub fn outcomes(&self) -> Receiver<JobOutcome> {
        self.outcome_rx.clone()
    }

    /// Acquire the video flag (atomically clearing any stale failure
    /// marker) and hand the plan to a background thread.
    pub fn submit(&self, project: &Project, plan: EditPlan) -> Result<(), SubmitError> {
        let acquire = [
            ProjectPatch::SetFailure(None),
            ProjectPatch::Acquire(JobKind::Video),
        ];
        match self.store.apply(project.id, &acquire) {
            Ok(_) => {}
            Err(StoreError::NotFound) => return Err(SubmitError::NotFound),
            Err(StoreError::Rejected(_)) => return Err(SubmitError::Busy),
        }

        let store      = Arc::clone(&self.store);
        let prober     = Arc::clone(&self.prober);
        let transcoder = Arc::clone(&self.transcoder);
        let outcome_tx = self.outcome_tx.clone();
        let id         = project.id;
        let input      = self.storage_dir.join(project.storage_id.to_string());

        info!("[edit] job accepted for {id}: {} step(s)", plan.steps().len());
        thread::spawn(move || {
            run_job(store, prober, transcoder, outcome_tx, id, input, plan);
        });
        Ok(())
    }
}

/// Releases the video flag and records a failure marker on drop unless the
/// job disarmed it after settling the record itself. This is what keeps a
/// project from being stuck in `processing` when a collaborator panics.
struct FlagLease {
    store: Arc<dyn ProjectStore>,
    id:    Uuid,
    armed: bool,
}

impl FlagLease {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for FlagLease {
    fn drop(&mut self) {
        if self.armed {
            let _ = self.store.apply(
                self.id,
                &[
                    ProjectPatch::Release(JobKind::Video),
                    ProjectPatch::SetFailure(Some("edit job aborted".into())),
                ],
            );
        }
    }
}

fn run_job(
    store:      Arc<dyn ProjectStore>,
    prober:     Arc<dyn Prober>,
    transcoder: Arc<dyn Transcoder>,
    outcome_tx: Sender<JobOutcome>,
    id:         Uuid,
    input:      PathBuf,
    plan:       EditPlan,
) {
    let lease = FlagLease { store: Arc::clone(&store), id, armed: true };
    let output = input.with_extension("part");

    match execute(&*prober, &*transcoder, &input, &plan, &output) {
        Ok(metadata) => {
            let commit = [
                ProjectPatch::SetMetadata(metadata),
                ProjectPatch::IncrementVersion,
                ProjectPatch::Release(JobKind::Video),
            ];
            match store.apply(id, &commit) {
                Ok(updated) => {
                    lease.disarm();
                    info!("[edit] committed {id} at version {}", updated.version);
                    let _ = outcome_tx.send(JobOutcome::Committed {
                        project: id,
                        version: updated.version,
                    });
                }
                Err(StoreError::NotFound) => {
                    // Deleted while in flight: the delete already answered
                    // its client, so the result is dropped quietly.
                    lease.disarm();
                    let _ = std::fs::remove_file(&input);
                    warn!("[edit] project {id} deleted mid-job, result discarded");
                    let _ = outcome_tx.send(JobOutcome::Discarded { project: id });
                }
                Err(e) => {
                    // Lease stays armed so Drop clears the flag.
                    warn!("[edit] commit for {id} rejected: {e}");
                    let _ = outcome_tx.send(JobOutcome::Failed {
                        project: id,
                        reason:  e.to_string(),
                    });
                }
            }
        }
        Err(reason) => {
            let _ = std::fs::remove_file(&output);
            let settle = [
                ProjectPatch::Release(JobKind::Video),
                ProjectPatch::SetFailure(Some(reason.clone())),
            ];
            match store.apply(id, &settle) {
                Ok(_) => {
                    warn!("[edit] job for {id} failed: {reason}");
                    let _ = outcome_tx.send(JobOutcome::Failed { project: id, reason });
                }
                Err(_) => {
                    warn!("[edit] project {id} deleted mid-job, failure discarded");
                    let _ = outcome_tx.send(JobOutcome::Discarded { project: id });
                }
            }
            lease.disarm();
        }
    }
}

/// Transcode, re-probe the produced file, and move it over the stored one.
/// Failure anywhere leaves the stored file untouched.
fn execute(
    prober:     &dyn Prober,
    transcoder: &dyn Transcoder,
    input:      &Path,
    plan:       &EditPlan,
    output:     &Path,
) -> Result<Metadata, String> {
    transcoder
        .run(input, plan, output)
        .map_err(|e| e.to_string())?;
    let metadata = prober.probe(output).map_err(|e| e.to_string())?;
    std::fs::rename(output, input).map_err(|e| format!("replacing stored file: {e}"))?;
    Ok(metadata)
}
