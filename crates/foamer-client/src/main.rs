//! Foamer message poster.
//!
//! # Usage
//!
//! ```bash
//! # Post to a local service
//! foamer-post "see you at the stop"
//!
//! # Post to a protected service
//! FOAMER_API_KEY=s3cret foamer-post --base-url https://board.example --require-api-key "hi"
//! ```

use std::{io, process::ExitCode};

use clap::Parser;
use foamer_client::{
    DEFAULT_BASE_URL, FormConfig, HttpTransport, Submitter, SystemEnv,
    report::{exit_code, is_failure, render_actions},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Foamer message poster
#[derive(Parser, Debug)]
#[command(name = "foamer-post")]
#[command(about = "Post a message to the Foamer message board")]
#[command(version)]
struct Args {
    /// Message to post (1-96 characters)
    content: String,

    /// Base URL of the message service
    #[arg(long, env = "FOAMER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Shared secret sent as the x-api-key header
    #[arg(long, env = "FOAMER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Refuse to submit without an API key
    #[arg(long)]
    require_api_key: bool,

    /// Stay until the success message auto-hides
    #[arg(long)]
    wait: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    let config = FormConfig {
        base_url: args.base_url,
        requires_api_key: args.require_api_key,
        ..FormConfig::default()
    };
    let mut submitter = Submitter::new(SystemEnv::new(), config, HttpTransport::new());

    submitter.set_content(args.content)?;
    if let Some(key) = args.api_key {
        submitter.set_api_key(key)?;
    }

    let mut stdout = io::stdout().lock();
    render_actions(&mut stdout, &submitter.submit().await?)?;

    if args.wait && !is_failure(submitter.form().status()) {
        render_actions(&mut stdout, &submitter.settle().await?)?;
    }

    Ok(exit_code(submitter.form().status()))
}
