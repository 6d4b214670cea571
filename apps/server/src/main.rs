#![warn(clippy::all, clippy::pedantic)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use clap::Parser;
use heartbeat::config::Config;
use heartbeat::{DumpFile, Heartbeat, HttpChecker, SharedTracker, Tracker};
use logger::init_tracing;
use tracing::info;

mod error;
mod routes;

use error::AppError;

/// Heartbeat server: tracks reachability of registered endpoints by
/// pinging them over HTTP at per-endpoint intervals.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_config(cli.config.as_deref())?;
    info!("{config}");

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;
    let settings = config.heartbeat;

    let checker = HttpChecker::new(Duration::from_secs(settings.probe_timeout_seconds))?;
    let mut tracker = Tracker::new(
        Arc::new(checker),
        DumpFile::new(settings.dump_file),
        settings.default_interval,
    );
    tracker.load().await?;

    let tracker = tracker.into_shared();
    Heartbeat::new(tracker.clone(), Duration::from_secs(settings.tick_seconds)).spawn();

    run_server(addr, tracker).await
}

async fn run_server(addr: SocketAddr, tracker: SharedTracker) -> Result<(), AppError> {
    let tracker = web::Data::new(tracker);

    HttpServer::new(move || App::new().app_data(tracker.clone()).configure(routes::routes))
        .bind(addr)?
        .run()
        .await?;

    Ok(())
}
