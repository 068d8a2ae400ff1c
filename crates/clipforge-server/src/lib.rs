// crates/clipforge-server/src/lib.rs
//
// Service wiring: routes + handlers on top of the core engine, an
// in-memory store, and the ffprobe/ffmpeg collaborators. Exposed as a
// library so the integration suite can drive the router with mock
// collaborators.

pub mod config;
pub mod error;
pub mod handlers;
pub mod orchestrator;
pub mod routes;
pub mod store;

pub use config::ServiceConfig;
pub use handlers::{AppState, SharedState};
pub use orchestrator::{EditOrchestrator, JobOutcome, SubmitError};
pub use store::MemoryStore;
