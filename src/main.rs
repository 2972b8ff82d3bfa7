//! Tor Służewiec race program service.
//!
//! Scrapes the public program page through a CORS relay, degrades through a
//! chain of fallback sources, and serves the normalized program plus jockey
//! statistics over HTTP and the CLI.

mod cli;
mod config;
mod generate;
mod leaderboard;
mod pipeline;
mod reference;
mod refresh;
mod routes;
mod scraper;
mod types;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::routes::AppState;
use crate::scraper::ProgramFetcher;
use crate::types::{DataSource, RaceProgram};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => run_server(Some(host), Some(port)).await,
        Commands::Fetch { format, day } => cli::run_fetch(format, day).await,
        Commands::Leaderboard {
            limit,
            policy,
            format,
            season,
        } => cli::run_leaderboard(limit, policy, format, season).await,
    }
}

/// Run the API server.
async fn run_server(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sluzewiec_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = AppConfig::load()?;

    // Override with CLI args
    if let Some(h) = host {
        config.server.host = h;
    }
    if let Some(p) = port {
        config.server.port = p;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("Program source: {}", config.source.program_url);

    let fetcher = ProgramFetcher::new(config.source.clone())?;

    // Start from the reference card so the state is always displayable,
    // then load the real program before accepting traffic.
    let state = Arc::new(AppState {
        config: config.clone(),
        fetcher,
        program: RwLock::new(Arc::new(RaceProgram {
            races: reference::reference_program(),
            source: DataSource::Reference,
            fetched_at: chrono::Utc::now(),
        })),
        fetch_lock: Mutex::new(()),
    });

    let initial = refresh::refresh_program(&state).await;
    tracing::info!(
        "initial program: {} races via {:?}",
        initial.races.len(),
        initial.source
    );

    // Periodic refresh
    tokio::spawn(refresh::run(Arc::clone(&state)));

    // Build router
    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/program", get(routes::program))
        .route("/leaderboard", get(routes::leaderboard))
        .route("/leaderboard/season", get(routes::season_leaderboard))
        .route("/refresh", post(routes::refresh))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
