// crates/clipforge-core/src/testutil.rs
//
// Shared fixtures for unit tests. Mirrors the 1280x720, 15 s h264 sample
// clip used by the integration suite.

use crate::project::Metadata;

pub(crate) fn sample_metadata() -> Metadata {
    Metadata {
        width:           1280,
        height:          720,
        duration:        15.0,
        codec:           "h264".into(),
        codec_long_name: "H.264 / AVC / MPEG-4 AVC / MPEG-4 part 10".into(),
        bit_rate:        1_045_818,
        frame_rate:      "25/1".into(),
        frame_count:     375,
        format_name:     "mov,mp4,m4a,3gp,3g2,mj2".into(),
        file_size:       1_962_408,
    }
}
