//! `persona serve` -- bind the listener and run the web host until shutdown.

use std::path::PathBuf;

use persona_infra::config::{default_config_path, load_config};

use crate::http;
use crate::state::AppState;

pub async fn serve(
    host: String,
    port: u16,
    config_path: Option<PathBuf>,
    api_key: Option<String>,
) -> anyhow::Result<()> {
    let config_path = config_path.unwrap_or_else(default_config_path);
    let mut config = load_config(&config_path).await;
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        config.rag.api_key = Some(key);
    }

    tracing::info!(
        config = %config_path.display(),
        endpoint = %config.rag.endpoint,
        collection = %config.profile.collection_name,
        "Configuration loaded"
    );

    let state = AppState::new(config);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!();
    println!(
        "  {} Persona listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());
    println!();

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
