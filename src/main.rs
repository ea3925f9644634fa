use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use usermanager::db::run_migrations;
use usermanager::logging::init_tracing;
use usermanager::metrics::{init_metrics, metrics_router};
use usermanager::router::init_router;
use usermanager::state::init_app_state;
use usermanager_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let server_config = ServerConfig::from_env();
    init_tracing(&server_config.log_dir)?;

    let state = init_app_state().await?;
    run_migrations(&state.db).await?;

    let mut app = init_router(state);
    if server_config.metrics_enabled {
        let handle = init_metrics()?;
        app = app.merge(metrics_router(handle));
    }

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, "Server running");
    info!("Swagger UI available at http://{}/swagger-ui", address);
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
