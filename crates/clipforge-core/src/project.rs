// crates/clipforge-core/src/project.rs
//
// The Project record and its probed Metadata — the only shared mutable
// resource in the system. Mutation after creation goes through typed
// patches (patch.rs) applied atomically by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Probed technical attributes of the stored media file at a point in time.
/// Created by the upload-time probe, replaced wholesale after each
/// committed edit. `width`, `height` and `duration` are strictly positive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub width:           u32,
    pub height:          u32,
    /// Seconds.
    pub duration:        f64,
    pub codec:           String,
    pub codec_long_name: String,
    pub bit_rate:        u64,
    /// Rational frame rate as reported by the probe, e.g. "25/1".
    pub frame_rate:      String,
    pub frame_count:     u64,
    pub format_name:     String,
    pub file_size:       u64,
}

/// Per-kind booleans, true while the corresponding async job is in flight.
/// The `video` flag doubles as the mutual-exclusion gate for edits: it is
/// acquired compare-and-swap style via `ProjectPatch::Acquire`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingFlags {
    pub video:               bool,
    pub thumbnail_preview:   bool,
    pub thumbnails_timeline: bool,
}

/// Storage keys of generated thumbnails. The thumbnail pipeline itself is
/// out of scope; the record fields stay part of the wire contract.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Thumbnails {
    pub preview:  Option<String>,
    pub timeline: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub metadata: Metadata,
    pub processing: ProcessingFlags,
    /// Starts at 1, +1 per committed edit. Never decreases.
    pub version: u64,
    /// Project this one was derived from; None for originals. Never mutated.
    pub parent: Option<Uuid>,
    pub thumbnails: Thumbnails,

    // ── Provenance, set once at creation ─────────────────────────────────
    pub original_filename: String,
    pub storage_id:        Uuid,
    pub mime_type:         String,
    pub create_time:       DateTime<Utc>,
    pub request_address:   String,

    /// Failure marker from the most recent asynchronous edit job, cleared
    /// when the next edit is accepted into the pipeline.
    pub last_error: Option<String>,
}

impl Project {
    /// Fresh record right after a successful upload-time probe:
    /// idle, all flags false, version 1, no parent.
    pub fn new(
        metadata:          Metadata,
        original_filename: String,
        storage_id:        Uuid,
        mime_type:         String,
        request_address:   String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            metadata,
            processing: ProcessingFlags::default(),
            version: 1,
            parent: None,
            thumbnails: Thumbnails::default(),
            original_filename,
            storage_id,
            mime_type,
            create_time: Utc::now(),
            request_address,
            last_error: None,
        }
    }
}
