//! Foamer server binary.
//!
//! # Usage
//!
//! ```bash
//! # Open service (development)
//! foamer-server --bind 127.0.0.1:8080
//!
//! # Require a shared secret on POST /messages
//! FOAMER_API_KEY=s3cret foamer-server --bind 0.0.0.0:8080
//! ```

use clap::Parser;
use foamer_server::{Server, ServerRuntimeConfig, ServiceConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Foamer message service
#[derive(Parser, Debug)]
#[command(name = "foamer-server")]
#[command(about = "Foamer message board service")]
#[command(version)]
struct Args {
    /// Address to bind to
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    bind: String,

    /// Shared secret required in the x-api-key header
    #[arg(long, env = "FOAMER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    tracing::info!("Foamer server starting");
    tracing::info!("Binding to {}", args.bind);

    let api_key = args.api_key.filter(|k| !k.is_empty());
    if api_key.is_none() {
        tracing::warn!("No API key configured - accepting unauthenticated messages");
    }

    let config =
        ServerRuntimeConfig { bind_address: args.bind, service: ServiceConfig { api_key } };

    let server = Server::bind(config).await?;

    tracing::info!("Server listening on {}", server.local_addr()?);

    server.run().await?;

    Ok(())
}
