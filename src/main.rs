use licitaseguro::{AppOptions, build_app};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("licitaseguro=info")),
        )
        .init();

    let options = AppOptions::from_env()?;
    let app = build_app(&options)?;

    let listener =
        tokio::net::TcpListener::bind(("0.0.0.0", options.listen_port)).await?;
    info!(port = options.listen_port, "licitaseguro backend listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
