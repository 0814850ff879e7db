//! DevConnect Node - developer social network API server.

use anyhow::Context;
use clap::Parser;
use devconnect_auth::JwtTokenService;
use devconnect_github::GitHubClient;
use devconnect_node::api::{create_router, AppState};
use devconnect_node::config::NodeConfig;
use devconnect_node::observability::{init_logging, LogFormat};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

/// DevConnect Node - accounts, developer profiles and posts over HTTP
#[derive(Parser, Debug)]
#[command(name = "devconnect-node")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen host
    #[arg(long)]
    host: Option<String>,

    /// Listen port
    #[arg(long)]
    port: Option<u16>,

    /// Document store connection string (memory:// or rocksdb://<path>)
    #[arg(long)]
    database_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty, json)
    #[arg(long)]
    log_format: Option<String>,
}

impl Args {
    fn apply(self, config: &mut NodeConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(url) = self.database_url {
            config.database_url = url;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(format) = self.log_format {
            config.log_format = LogFormat::parse(&format);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config =
        NodeConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply(&mut config);

    init_logging(&config.log_level, config.log_format);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting DevConnect node");

    let backend = devconnect_storage::open(&config.database_url)
        .with_context(|| format!("Failed to open document store {}", config.database_url))?;
    let tokens = Arc::new(JwtTokenService::new(&config.jwt_secret));
    let github = Arc::new(
        GitHubClient::new(config.github_api_url.clone(), config.github_token.clone())
            .context("Failed to build GitHub client")?,
    );

    let state = AppState::new(Arc::clone(&backend), tokens, github);
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(addr = %addr, database = %config.database_url, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    backend.flush().context("Failed to flush document store")?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
