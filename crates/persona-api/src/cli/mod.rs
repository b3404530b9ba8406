//! CLI definitions for the `persona` binary.

pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Chat with an assistant that speaks as the person described by a
/// document collection.
#[derive(Parser)]
#[command(name = "persona", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Detailed output (-v for debug, -vv for trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web host.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "10101")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Config file (defaults to ~/.persona/persona.toml).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Default API key pre-filled into the login form.
        #[arg(long, env = "PERSONA_RAG_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
}
