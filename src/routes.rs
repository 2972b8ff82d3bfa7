//! API route handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::config::AppConfig;
use crate::generate;
use crate::leaderboard::{compute_leaderboard, WinPolicy};
use crate::reference;
use crate::scraper::ProgramFetcher;
use crate::types::{
    ErrorResponse, HealthResponse, LeaderboardResponse, ProgramResponse, RaceDay, RaceProgram,
};

/// Hard cap on leaderboard size regardless of the query.
const MAX_LEADERBOARD: usize = 20;

/// Application state shared across handlers and the refresh task.
pub struct AppState {
    pub config: AppConfig,
    pub fetcher: ProgramFetcher,
    /// Current snapshot; replaced wholesale after each pipeline run.
    pub program: RwLock<Arc<RaceProgram>>,
    /// Serializes pipeline runs: the interval task and manual refreshes
    /// never overlap.
    pub fetch_lock: Mutex<()>,
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.status.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Deserialize)]
pub struct ProgramQuery {
    pub day: Option<RaceDay>,
}

/// Current program snapshot, optionally narrowed to one card.
pub async fn program(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProgramQuery>,
) -> Json<ProgramResponse> {
    let snapshot = state.program.read().await.clone();
    let races = match query.day {
        Some(day) => snapshot.races_for_day(day),
        None => snapshot.races.clone(),
    };

    Json(ProgramResponse {
        source: snapshot.source,
        degraded: snapshot.is_degraded(),
        fetched_at: snapshot.fetched_at,
        races,
    })
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
    pub policy: Option<WinPolicy>,
}

/// Jockey leaderboard over the current snapshot.
pub async fn leaderboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let limit = validate_limit(query.limit.unwrap_or(state.config.leaderboard.size))?;
    let policy = query.policy.unwrap_or(state.config.leaderboard.win_policy);

    let snapshot = state.program.read().await.clone();
    let mut rng = generate::rng_from(state.config.generator.seed);
    let jockeys = compute_leaderboard(&snapshot.races, limit, policy, &mut rng);

    Ok(Json(LeaderboardResponse { jockeys }))
}

#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    pub limit: Option<usize>,
}

/// Season-to-date standings from the reference table.
pub async fn season_leaderboard(
    Query(query): Query<SeasonQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let limit = validate_limit(query.limit.unwrap_or(10))?;

    Ok(Json(LeaderboardResponse {
        jockeys: reference::top_jockeys(limit),
    }))
}

/// Force a pipeline run and return the fresh snapshot.
pub async fn refresh(State(state): State<Arc<AppState>>) -> Json<ProgramResponse> {
    let snapshot = crate::refresh::refresh_program(&state).await;

    Json(ProgramResponse {
        source: snapshot.source,
        degraded: snapshot.is_degraded(),
        fetched_at: snapshot.fetched_at,
        races: snapshot.races.clone(),
    })
}

fn validate_limit(limit: usize) -> Result<usize, ApiError> {
    if limit == 0 || limit > MAX_LEADERBOARD {
        return Err(ApiError::bad_request(format!(
            "limit must be between 1 and {}",
            MAX_LEADERBOARD
        )));
    }
    Ok(limit)
}
