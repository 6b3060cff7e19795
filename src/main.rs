use std::{net::SocketAddr, sync::Arc};

use storefront::{config::StoreConfig, logger::init_logger, router::create_app_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = StoreConfig::from_env();
    init_logger(&config.log_level, config.log_json)?;

    // Initialize application state
    let port = config.port;
    let state = Arc::new(AppState::from_config(config)?);

    // A failed first fetch is recorded in the catalog status; the server
    // still starts and the catalog can be refreshed later.
    if let Err(e) = state.refresh_catalog().await {
        tracing::warn!(error = %e, "Starting with an empty catalog");
    }

    // Build application router with all routes and middleware
    let app = create_app_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Storefront listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Pending saves must reach the store before the process exits.
    state.persistence.flush().await;
    tracing::info!("Storefront stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
