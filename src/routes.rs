//! API route handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::leaderboard::{run_with_config, LeaderboardOutcome};
use crate::scraper::HttpFetcher;
use crate::tables::InputTables;
use crate::types::{ErrorResponse, HealthResponse, LeaderboardRequest, LeaderboardResponse};

/// Application state shared across handlers.
pub struct AppState {
    pub config: AppConfig,
    pub fetcher: HttpFetcher,
    /// Held for the duration of a run so reruns never overlap
    pub run_lock: Mutex<()>,
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
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

/// Rebuild the leaderboard on demand.
///
/// The input tables are re-read on every request. A table that cannot be
/// loaded fails the request; races without results only shrink the leaderboard.
pub async fn leaderboard(
    State(state): State<Arc<AppState>>,
    body: Option<Json<LeaderboardRequest>>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let _running = state.run_lock.lock().await;

    let tables = InputTables::load(&state.config.sources)
        .map_err(|e| ApiError::internal(format!("{:#}", e)))?;

    let outcome = run_with_config(&state.config, &tables, &state.fetcher, req.refresh).await;

    Ok(Json(into_response(outcome)))
}

fn into_response(outcome: LeaderboardOutcome) -> LeaderboardResponse {
    match outcome {
        LeaderboardOutcome::Standings(board) => LeaderboardResponse {
            status: "ok".to_string(),
            standings: board.standings,
            breakdown: board.breakdown,
        },
        LeaderboardOutcome::NoData => LeaderboardResponse {
            status: "no_data".to_string(),
            standings: Vec::new(),
            breakdown: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::Leaderboard;
    use crate::types::StandingEntry;

    #[test]
    fn test_no_data_response() {
        let response = into_response(LeaderboardOutcome::NoData);
        assert_eq!(response.status, "no_data");
        assert!(response.standings.is_empty());
        assert!(response.breakdown.is_empty());
    }

    #[test]
    fn test_standings_response_serializes() {
        let response = into_response(LeaderboardOutcome::Standings(Leaderboard {
            standings: vec![StandingEntry {
                rider_name: "A Rider".to_string(),
                team: "Team X".to_string(),
                points: 10.0,
            }],
            breakdown: Vec::new(),
        }));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["standings"][0]["rider_name"], "A Rider");
        assert_eq!(json["standings"][0]["team"], "Team X");
        assert_eq!(json["standings"][0]["points"], 10.0);
    }

    #[test]
    fn test_api_error_status() {
        let response = ApiError::internal("Could not open input table riders.csv").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
