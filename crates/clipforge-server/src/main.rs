// crates/clipforge-server/src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, info};

use clipforge_core::{Prober, ProjectStore, Transcoder};
use clipforge_media::{FfmpegTranscoder, FfprobeProber};
use clipforge_server::handlers::AppState;
use clipforge_server::orchestrator::EditOrchestrator;
use clipforge_server::store::MemoryStore;
use clipforge_server::{routes, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ServiceConfig::from_env()?;
    std::fs::create_dir_all(&config.storage_dir)?;

    let store: Arc<dyn ProjectStore> = Arc::new(MemoryStore::new());
    let prober: Arc<dyn Prober> = Arc::new(FfprobeProber);
    let transcoder: Arc<dyn Transcoder> = Arc::new(FfmpegTranscoder);
    let orchestrator = Arc::new(EditOrchestrator::new(
        Arc::clone(&store),
        Arc::clone(&prober),
        transcoder,
        config.storage_dir.clone(),
    ));

    // Single drain for job outcomes; the jobs log their own details.
    let outcomes = orchestrator.outcomes();
    std::thread::spawn(move || {
        for outcome in outcomes.iter() {
            debug!("[edit] outcome: {outcome:?}");
        }
    });

    let state = Arc::new(AppState {
        store,
        prober,
        orchestrator,
        limits: config.limits,
        storage_dir: config.storage_dir.clone(),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("[server] listening on {}", config.bind_addr);
    axum::serve(
        listener,
        routes::router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
