use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use ats_backend::config::{get_config, init_config};
use ats_backend::routes::app_router;
use ats_backend::store::memory::MemoryStore;
use ats_backend::store::resume::LocalResumeStore;
use ats_backend::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ats_backend=info,tower_http=info".into()),
        )
        .init();
    init_config()?;
    let config = get_config();

    let store = Arc::new(MemoryStore::new());
    let resumes = Arc::new(LocalResumeStore::new(config.uploads_dir.clone()));
    info!("Serving uploads from: {}", config.uploads_dir);

    let app_state = AppState::new(store, resumes);

    let app = app_router(app_state, config.api_rps)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
