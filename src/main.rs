use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{error, info};

use coursehub::coursehub_config::ServerConfig;
use coursehub::coursehub_db::run_migrations;
use coursehub::logging::init_tracing;
use coursehub::metrics::{init_metrics, metrics_app};
use coursehub::router::init_router;
use coursehub::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing().context("Failed to initialise logging")?;

    let server_config = ServerConfig::from_env();

    let state = init_app_state()
        .await
        .context("Failed to initialise application state")?;
    run_migrations(&state.db)
        .await
        .context("Failed to run database migrations")?;

    let _sweeper = state.gate.spawn_sweeper();

    if let Some(handle) = init_metrics().context("Failed to install metrics recorder")? {
        let addr = format!("0.0.0.0:{}", server_config.metrics_port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind metrics listener on {addr}"))?;
        info!("Metrics available at http://{addr}/metrics");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let app = init_router(state);

    let addr = format!("0.0.0.0:{}", server_config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server running on http://localhost:{}", server_config.port);
    info!(
        "Swagger UI available at http://localhost:{}/swagger-ui",
        server_config.port
    );
    info!(
        "Scalar UI available at http://localhost:{}/scalar",
        server_config.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Keep serving rather than exit on a broken signal handler
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
