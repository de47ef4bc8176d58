//! postdeck-server - dashboard and posting gateway for X

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use libpostdeck::config::Config;
use libpostdeck::logging::{LogFormat, LoggingConfig};
use libpostdeck::provider::x::XProvider;
use libpostdeck::{PostdeckError, XCredentials};
use postdeck_server::routes::{create_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "postdeck-server")]
#[command(about = "Dashboard and posting gateway for X", long_about = None)]
struct Cli {
    /// Address to bind the HTTP server to (overrides the config file)
    #[arg(short, long)]
    bind: Option<String>,

    /// Path to the config file (default: XDG config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log output format (text, json, or pretty)
    #[arg(long, default_value = "text")]
    log_format: LogFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = std::env::var("POSTDECK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    LoggingConfig::new(cli.log_format, level, cli.verbose).init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<PostdeckError>()
            .map(PostdeckError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    // The gateway cannot operate without the provider secrets; missing
    // ones are fatal here, before the server starts listening
    let credentials = XCredentials::from_env()?;
    let provider = Arc::new(XProvider::from_config(credentials, &config.provider));

    let timeout = config
        .provider
        .submit_timeout_secs
        .map(Duration::from_secs);
    let state = AppState::new(provider, timeout);
    let app = create_router(state);

    let bind = cli.bind.unwrap_or(config.server.bind);
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("Postdeck listening on http://{}", bind);

    axum::serve(listener, app).await?;
    Ok(())
}
