use clap::Parser;
use cropcast_server::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::parse();
    tracing::info!("cropcast v{}", env!("CARGO_PKG_VERSION"));

    // Refuses to start without a loadable model; scalers are optional.
    let state = cropcast_server::init_state(&config)?;
    let app = cropcast_server::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %config.bind, "serving");
    axum::serve(listener, app).await?;
    Ok(())
}
