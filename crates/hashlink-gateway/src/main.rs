use anyhow::Context;
use clap::Parser;
use hashlink_gateway::backend::build_shortener;
use hashlink_gateway::cli::Cli;
use hashlink_gateway::telemetry::init_tracing;
use hashlink_gateway::{App, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format)?;

    info!(
        listen_addr = %cli.listen_addr,
        base_url = %cli.base_url,
        storage_backend = %cli.storage,
        cache_backend = %cli.cache,
        code_length = cli.code_length,
        "starting hashlink gateway"
    );

    let shortener = build_shortener(&cli).await?;
    let state = AppState::new(shortener, cli.base_url.clone());

    let listener = tokio::net::TcpListener::bind(cli.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
