use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::catalog::{Aggregator, Pipeline, Resolver};
use crate::config::Config;
use crate::error::AppError;
use crate::mosaic::MosaicRenderer;
use crate::steam::{SteamApi, SteamClient};
use crate::web::{self, AppState};

/// Wire the Steam client, pipeline and renderer together from the configuration.
pub fn build_state(config: &Config) -> Result<AppState, AppError> {
    let steam: Arc<dyn SteamApi> = Arc::new(SteamClient::new(
        config.steam_api_key.clone(),
        config.steam_api_base_url.clone(),
    )?);

    let pipeline = Pipeline::new(Resolver::new(steam.clone()), Aggregator::new(steam));
    let renderer = MosaicRenderer::new(config.cover_source(), config.mosaic)?;

    Ok(AppState {
        pipeline: Arc::new(pipeline),
        renderer: Arc::new(renderer),
    })
}

pub async fn run(config: Config) -> Result<(), AppError> {
    info!(
        bind_addr = %config.bind_addr,
        steam_api_base_url = %config.steam_api_base_url,
        columns = config.mosaic.columns,
        packing = ?config.mosaic.packing,
        "⚙️ Config loaded"
    );

    let app = web::router(build_state(&config)?);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("🚀 Tuvalix listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "⚠️ SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
