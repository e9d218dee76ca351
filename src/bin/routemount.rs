//! Demo server: discover route modules under a directory and serve them.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use routemount::{discover, App, DiscoveryConfig, ROUTE_TABLE_PATH};

#[derive(Parser)]
#[command(name = "routemount")]
#[command(about = "Serve the route modules found under a directory", long_about = None)]
struct Cli {
    /// Directory to scan. Defaults to the current directory.
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Address to serve on.
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Space-separated folder and file names to exclude, e.g. "build secrets.json".
    #[arg(short, long, default_value = "")]
    exclude: String,

    /// Serve the live route table at /_routes.
    #[arg(long)]
    route_table: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routemount=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = DiscoveryConfig::new()
        .with_exclude_filter(&cli.exclude)
        .with_route_table(cli.route_table);
    if let Some(root) = cli.root {
        config = config.with_project_path(root);
    }

    let mut app = App::new();
    let report = discover(&mut app, config).await?;
    tracing::info!(
        mounted = report.mounted(),
        routes = report.mounted_routes(),
        failed = report.failed(),
        "Discovery finished"
    );
    if cli.route_table {
        tracing::info!(path = ROUTE_TABLE_PATH, "Route table enabled");
    }

    let listener = TcpListener::bind(cli.addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let router = app.into_router().layer(TraceLayer::new_for_http());
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
