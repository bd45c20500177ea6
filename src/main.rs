use chrono::Local;
use habit_tracker::config::Backend;
use habit_tracker::{AppState, Config, open_store, router, tracker};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    match &config.backend {
        Backend::File { path } => info!("storing habits in {}", path.display()),
        Backend::Remote { url, .. } => info!("storing habits at {url}"),
    }

    let store = open_store(&config.backend).await?;
    let state = AppState::new(store);
    match tracker::refresh(&state, Local::now().date_naive()).await {
        Ok(habits) => info!("loaded {} habits", habits.len()),
        Err(err) => warn!("initial fetch failed: {err}"),
    }

    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
