//! Nonprofit Search binary — loads the data directory and serves the search
//! API plus the built web UI.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use nonprofit_search_core::config::{load_config, CONFIG_FILE_NAME};
use nonprofit_search_core::types::ServerConfig;
use nonprofit_search_http::{router, AppContext};

// ---------------------------------------------------------------------------
// CLI definition (clap derive)
// ---------------------------------------------------------------------------

/// Nonprofit organization search — JSON API and web UI.
#[derive(Parser)]
#[command(name = "nonprofit-search", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding nonprofits_*.csv / .txt files (default: config file directory or cwd)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Config file (default: ./nonprofit-search.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to web UI dist directory
    #[arg(long)]
    dist: Option<PathBuf>,

    /// Bind to 0.0.0.0 instead of 127.0.0.1 (localhost)
    #[arg(long)]
    bind_all: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// First port tried when neither `PORT` nor the config fixes one.
const BASE_PORT: u16 = 8432;
const PORT_RANGE: u16 = 10;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Config file values, overridden by CLI flags.
fn resolve_config(cli: &Cli) -> ServerConfig {
    let mut config = match &cli.config {
        Some(path) => {
            if !path.exists() {
                warn!(path = %path.display(), "Config file not found, using defaults");
            }
            load_config(path)
        }
        None => load_config(Path::new(CONFIG_FILE_NAME)),
    };

    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(dist) = &cli.dist {
        config.dist = Some(dist.clone());
    }
    if cli.bind_all {
        config.bind_all = true;
    }
    config
}

/// Resolve dist dir: configured path, then ./dist, ./apps/web/dist, ../dist.
fn resolve_dist(config: &ServerConfig) -> PathBuf {
    if let Some(dist) = &config.dist {
        return dist.clone();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let candidates = [cwd.join("dist"), cwd.join("apps/web/dist"), cwd.join("../dist")];
    candidates.into_iter().find(|p| p.join("index.html").exists()).unwrap_or_else(|| {
        warn!("No dist/ directory found — build apps/web to serve the search page");
        cwd.join("dist")
    })
}

async fn bind_listener(config: &ServerConfig) -> tokio::net::TcpListener {
    let bind_addr = if config.bind_all { "0.0.0.0" } else { "127.0.0.1" };

    let explicit_port: Option<u16> =
        std::env::var("PORT").ok().and_then(|p| p.parse().ok()).or(config.port);

    if let Some(port) = explicit_port {
        return tokio::net::TcpListener::bind(format!("{bind_addr}:{port}")).await.unwrap_or_else(|e| {
            error!(port = port, error = %e, "Could not bind to port");
            std::process::exit(1);
        });
    }

    // Auto-scan: try 8432..=8441
    for port in BASE_PORT..BASE_PORT + PORT_RANGE {
        if let Ok(listener) = tokio::net::TcpListener::bind(format!("{bind_addr}:{port}")).await {
            return listener;
        }
    }
    error!(range_start = BASE_PORT, range_end = BASE_PORT + PORT_RANGE - 1, "No free port found");
    eprintln!("  Try: PORT=<port> nonprofit-search");
    std::process::exit(1);
}

// ---------------------------------------------------------------------------
// Graceful shutdown signal
// ---------------------------------------------------------------------------

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received SIGINT, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                warn!(error = %e, "Could not register SIGTERM handler");
                let _ = ctrl_c.await;
                info!("Received SIGINT, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
        info!("Received Ctrl+C, shutting down...");
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nonprofit_search=info".parse().expect("static directive")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "nonprofit-search", &mut std::io::stdout());
        return;
    }

    let config = resolve_config(&cli);

    if !config.data_dir.is_dir() {
        error!(path = %config.data_dir.display(), "Data directory not found");
        std::process::exit(1);
    }

    info!(data_dir = %config.data_dir.display(), "Starting application...");
    let data_dir = config.data_dir.clone();
    let index = match tokio::task::spawn_blocking(move || nonprofit_search_core::load_dir(&data_dir)).await {
        Ok(index) => index,
        Err(e) => {
            error!(error = %e, "Data loading failed");
            std::process::exit(1);
        }
    };
    if index.datasets.is_empty() {
        warn!("No data files loaded — every search will return no results");
    }

    let dist_dir = resolve_dist(&config);
    let index_html = dist_dir.join("index.html");

    let app = router(AppContext::new(index))
        .fallback_service(ServeDir::new(&dist_dir).not_found_service(ServeFile::new(&index_html)))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    let listener = bind_listener(&config).await;
    let port = listener.local_addr().map(|a| a.port()).unwrap_or_default();

    info!(dist = %dist_dir.display(), "Serving web UI");
    info!(port = port, "http://localhost:{port}");
    // Machine-readable line for scripts (not through tracing)
    eprintln!("NONPROFIT_SEARCH_PORT={port}");

    if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
