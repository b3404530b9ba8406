//! Persona web host entry point.
//!
//! Binary name: `persona`
//!
//! Parses CLI arguments, sets up tracing, then serves the browser shell and
//! its WebSocket until shutdown.

mod cli;
mod http;
mod state;

use clap::Parser;

use cli::{Cli, Commands};
use persona_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(verbosity_filter(cli.verbose), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = match cli.command {
        Commands::Serve {
            port,
            host,
            config,
            api_key,
        } => cli::serve::serve(host, port, config, api_key).await,
    };

    shutdown_tracing();
    result
}
