//! Bloom Timer - a focus timer that grows a flower while you study
//!
//! This is the main entry point for the bloom-timer service.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use bloom_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("bloom_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting bloom-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, default={}min, tick={}ms",
          config.host, config.port, config.default_minutes, config.tick_ms);

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.default_minutes,
        config.tick_period(),
    ));

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /session            - Start a focus session");
    info!("  GET  /session            - Current countdown and flower");
    info!("  POST /session/stop       - Stop the session early");
    info!("  POST /session/background - App lost foreground, flower withers");
    info!("  POST /session/back       - Leave the timer screen");
    info!("  GET  /session/result     - Focus summary once ended");
    info!("  GET  /health             - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.shutdown() {
        tracing::warn!("Failed to tear down active session: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
