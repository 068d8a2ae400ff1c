// crates/clipforge-core/src/state.rs
//
// Project state machine: a project is `idle` for a job kind when its flag
// is false and `processing(kind)` while it is true. The three kinds are
// independent, but at most one *video* job may be in flight per project —
// acquiring the flag (patch.rs, `ProjectPatch::Acquire`) is the
// compare-and-swap gate that substitutes for a lock.

use serde::{Deserialize, Serialize};

use crate::project::ProcessingFlags;

/// Kind of asynchronous job that can hold a processing flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Video,
    ThumbnailPreview,
    ThumbnailsTimeline,
}

impl JobKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::Video              => "video",
            JobKind::ThumbnailPreview   => "thumbnail_preview",
            JobKind::ThumbnailsTimeline => "thumbnails_timeline",
        }
    }
}

impl ProcessingFlags {
    pub fn get(&self, kind: JobKind) -> bool {
        match kind {
            JobKind::Video              => self.video,
            JobKind::ThumbnailPreview   => self.thumbnail_preview,
            JobKind::ThumbnailsTimeline => self.thumbnails_timeline,
        }
    }

    pub fn set(&mut self, kind: JobKind, value: bool) {
        match kind {
            JobKind::Video              => self.video = value,
            JobKind::ThumbnailPreview   => self.thumbnail_preview = value,
            JobKind::ThumbnailsTimeline => self.thumbnails_timeline = value,
        }
    }

    /// True while any kind of job is in flight.
    pub fn any(&self) -> bool {
        self.video || self.thumbnail_preview || self.thumbnails_timeline
    }
}
