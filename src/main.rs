//! Deduction administration HTTP server.

use std::sync::Arc;

use deduction_admin::api::{AppState, create_router};
use deduction_admin::config::{ConfigLoader, ServiceSettings};
use deduction_admin::extraction::GeminiExtractor;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = ServiceSettings::from_env();
    init_tracing(settings.log_json);

    let config = ConfigLoader::load(&settings.catalog_dir)?;
    info!(
        catalog_dir = %settings.catalog_dir,
        categories = config.categories().len(),
        seed_deductions = config.config().deductions().len(),
        "Catalog loaded"
    );

    if settings.extraction.api_key.is_none() {
        warn!("No model API key configured; bulk import and code suggestions are disabled");
    }
    let extractor = GeminiExtractor::new(settings.extraction.clone())?;
    let state = AppState::new(config, Arc::new(extractor))?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    info!(
        addr = %listener.local_addr()?,
        model = %settings.extraction.model,
        "Deduction admin listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("Failed to register signal handlers; falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received");
}
