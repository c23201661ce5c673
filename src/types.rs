//! Records flowing through the leaderboard pipeline and the HTTP API.

use serde::{Deserialize, Serialize};

/// A scheduled race or stage, one row of the race list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    /// Path of the results page on the stats site, e.g. `race/tour-de-france/2025/stage-1`
    #[serde(alias = "source_identifier")]
    pub pcs_slug: String,
    #[serde(alias = "display_name")]
    pub race_name: String,
}

/// Points awarded for finishing at a given rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub rank: u32,
    pub points: f64,
}

/// A rider on the fantasy roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rider {
    #[serde(alias = "finisher_name")]
    pub rider_name: String,
    #[serde(alias = "owner_or_team")]
    pub team: String,
}

/// One finisher scraped from a results page, before it is tagged with a race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinisherResult {
    pub rider_name: String,
    pub rank: u32,
}

/// A finisher tagged with the display name of the race it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinisherRow {
    pub rider_name: String,
    pub rank: u32,
    pub race: String,
}

impl FinisherRow {
    pub fn new(result: FinisherResult, race: &str) -> Self {
        Self {
            rider_name: result.rider_name,
            rank: result.rank,
            race: race.to_string(),
        }
    }
}

/// Finisher row with the points its rank earns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRow {
    pub rider_name: String,
    pub rank: u32,
    pub race: String,
    pub points: f64,
}

/// Scored row attributed to the fantasy team owning the rider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedRow {
    pub rider_name: String,
    pub rank: u32,
    pub race: String,
    pub points: f64,
    pub team: String,
}

/// Aggregated points of one rider for one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingEntry {
    pub rider_name: String,
    pub team: String,
    pub points: f64,
}

/// One line of the detailed point breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub race: String,
    pub rider_name: String,
    pub rank: u32,
    pub points: f64,
}

impl From<&OwnedRow> for BreakdownRow {
    fn from(row: &OwnedRow) -> Self {
        Self {
            race: row.race.clone(),
            rider_name: row.rider_name.clone(),
            rank: row.rank,
            points: row.points,
        }
    }
}

/// Leaderboard request body
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardRequest {
    /// Drop cached race results before scraping
    #[serde(default)]
    pub refresh: bool,
}

/// Leaderboard response
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    /// "ok" or "no_data"
    pub status: String,
    pub standings: Vec<StandingEntry>,
    pub breakdown: Vec<BreakdownRow>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
