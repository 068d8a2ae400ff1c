// crates/clipforge-media/src/lib.rs
//
// CLI-backed collaborator implementations — ffprobe for metadata, ffmpeg
// for executing edit plans. Codec-agnostic and free of native bindings;
// both tools are driven as blocking subprocesses on background threads.

pub mod probe;
pub mod transcode;

// Re-export the main public API so clipforge-server imports are simple.
pub use probe::FfprobeProber;
pub use transcode::FfmpegTranscoder;
