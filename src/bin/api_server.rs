//! REST API Server for linehaul trip reports
//!
//! Usage:
//!   ./target/release/api_server [options]
//!
//! Options:
//!   --port PORT         Port to listen on (default: 8080)
//!   --data-dir PATH     Directory holding trip CSV exports (default: raw-data)
//!   --config PATH       TOML configuration file
//!
//! REST endpoints:
//!   GET /api/v1/health              - Health check
//!   GET /api/v1/dates               - Trip dates in the newest export
//!   GET /api/v1/hubs                - Mother hubs in the newest export
//!   GET /api/v1/report              - Full report (?date=&hubs=&top=)
//!   GET /api/v1/kpis                - Fleet KPI scorecard
//!   GET /api/v1/hubs/summary        - Hub performance table
//!   GET /api/v1/vendors/top         - Vendor failure ranking

use anyhow::Result;
use axum::{routing::get, Router};
use clap::Parser;
use linehaul_ops::api::{handlers, ReportService};
use linehaul_ops::config::AppConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "api_server")]
#[command(about = "Serve linehaul trip reports over REST")]
struct Args {
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Directory holding trip CSV exports
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn print_banner(port: u16, data_dir: &std::path::Path) {
    println!("============================================================");
    println!("           LINEHAUL OPERATIONS API SERVER");
    println!("============================================================");
    println!();
    println!("  Port:     {}", port);
    println!("  Data:     {}", data_dir.display());
    println!("  REST:     http://localhost:{}/api/v1/", port);
    println!();
    println!("REST Endpoints:");
    println!("  GET /api/v1/health              Health check");
    println!("  GET /api/v1/dates               Available trip dates");
    println!("  GET /api/v1/hubs                Available mother hubs");
    println!("  GET /api/v1/report              Full report");
    println!("  GET /api/v1/kpis                KPI scorecard");
    println!("  GET /api/v1/hubs/summary        Hub performance");
    println!("  GET /api/v1/vendors/top         Vendor ranking");
    println!();
    println!("============================================================");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .init();

    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    print_banner(config.server.port, &config.data_dir);

    let service = Arc::new(ReportService::new(config.data_dir.clone(), config.engine()));
    let addr: SocketAddr = format!("0.0.0.0:{}", config.server.port).parse()?;

    let app = create_rest_router(service);
    tracing::info!("Starting REST server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_rest_router(service: Arc<ReportService>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(handlers::health))
        // Filter options
        .route("/api/v1/dates", get(handlers::get_dates))
        .route("/api/v1/hubs", get(handlers::get_hubs))
        // Reports
        .route("/api/v1/report", get(handlers::get_report))
        .route("/api/v1/kpis", get(handlers::get_kpis))
        .route("/api/v1/hubs/summary", get(handlers::get_hub_summary))
        .route("/api/v1/vendors/top", get(handlers::get_top_vendors))
        // State and middleware
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
