//! Fantasy cycling leaderboard
//!
//! Scrapes race results from procyclingstats.com, scores them against a
//! points table and sums them per rostered rider. Runs once from the CLI or
//! on demand behind an HTTP endpoint.

mod cli;
mod config;
mod leaderboard;
mod retry;
mod routes;
mod scraper;
mod tables;
mod types;

use axum::{routing::get, routing::post, Router};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::routes::AppState;
use crate::scraper::HttpFetcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is reserved for the leaderboard itself
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fantasy_cycling=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Leaderboard(args) => cli::run_leaderboard(args).await,
        Commands::Serve { host, port } => run_server(host, port).await,
    }
}

/// Run the API server.
async fn run_server(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let mut config = AppConfig::load()?;

    if let Some(h) = host {
        config.server.host = h;
    }
    if let Some(p) = port {
        config.server.port = p;
    }

    tracing::info!("Configuration loaded");
    tracing::info!(
        "Input tables: {}, {}, {}",
        config.sources.races.display(),
        config.sources.scoring.display(),
        config.sources.riders.display()
    );

    let fetcher = HttpFetcher::new(&config.scraper)?;
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = Arc::new(AppState {
        config,
        fetcher,
        run_lock: Mutex::new(()),
    });

    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/leaderboard", post(routes::leaderboard))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
