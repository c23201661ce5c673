//! CLI commands for fantasy-cycling.
//!
//! Builds the leaderboard once from the command line, or serves it over HTTP.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::leaderboard::{run_with_config, Leaderboard, LeaderboardOutcome};
use crate::scraper::HttpFetcher;
use crate::tables::InputTables;
use crate::types::{BreakdownRow, StandingEntry};

#[derive(Parser)]
#[command(name = "fantasy-cycling")]
#[command(version, about = "Fantasy cycling leaderboard from live procyclingstats.com results", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape every race and print the leaderboard
    Leaderboard(LeaderboardArgs),

    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(clap::Args)]
pub struct LeaderboardArgs {
    /// Race list CSV (pcs_slug, race_name)
    #[arg(long, value_name = "FILE")]
    pub races: Option<PathBuf>,

    /// Scoring table CSV (rank, points)
    #[arg(long, value_name = "FILE")]
    pub scoring: Option<PathBuf>,

    /// Rider roster CSV (rider_name, team)
    #[arg(long, value_name = "FILE")]
    pub riders: Option<PathBuf>,

    /// Finishers read per race
    #[arg(short = 'n', long)]
    pub max_results: Option<usize>,

    /// Drop cached race results before scraping
    #[arg(long)]
    pub refresh: bool,

    /// Do not read or write the result cache
    #[arg(long)]
    pub no_cache: bool,

    /// Also print where every point came from
    #[arg(short, long)]
    pub breakdown: bool,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

impl LeaderboardArgs {
    /// Apply command line overrides on top of the loaded configuration
    fn apply(&self, config: &mut AppConfig) {
        if let Some(path) = &self.races {
            config.sources.races = path.clone();
        }
        if let Some(path) = &self.scoring {
            config.sources.scoring = path.clone();
        }
        if let Some(path) = &self.riders {
            config.sources.riders = path.clone();
        }
        if let Some(n) = self.max_results {
            config.scraper.max_results = n;
        }
        if self.no_cache {
            config.cache.enabled = false;
        }
    }
}

/// Build the leaderboard once and print it.
pub async fn run_leaderboard(args: LeaderboardArgs) -> anyhow::Result<()> {
    let mut config = AppConfig::load()?;
    args.apply(&mut config);

    // Fatal before any network traffic if a table is missing or invalid
    let tables = InputTables::load(&config.sources)?;
    let fetcher = HttpFetcher::new(&config.scraper)?;

    eprintln!("Scraping live data from PCS for {} races...", tables.races.len());
    let outcome = run_with_config(&config, &tables, &fetcher, args.refresh).await;

    match (outcome, args.format.as_str()) {
        (LeaderboardOutcome::NoData, "json") => {
            let json_output = serde_json::json!({
                "status": "no_data",
                "standings": [],
                "breakdown": [],
            });
            println!("{}", serde_json::to_string_pretty(&json_output)?);
        }
        (LeaderboardOutcome::NoData, _) => {
            println!("No results found. Check your PCS slugs in {}.", config.sources.races.display());
        }
        (LeaderboardOutcome::Standings(board), "json") => {
            let breakdown = if args.breakdown { board.breakdown } else { Vec::new() };
            let json_output = serde_json::json!({
                "status": "ok",
                "standings": board.standings,
                "breakdown": breakdown,
            });
            println!("{}", serde_json::to_string_pretty(&json_output)?);
        }
        (LeaderboardOutcome::Standings(board), _) => {
            print!("{}", render_table(&board, args.breakdown));
        }
    }

    Ok(())
}

/// Render the standings (and optionally the breakdown) as plain text tables
fn render_table(board: &Leaderboard, with_breakdown: bool) -> String {
    let mut out = String::new();

    out.push_str("=== Current Leaderboard ===\n");
    out.push_str(&standings_table(&board.standings));

    if with_breakdown {
        out.push('\n');
        out.push_str("=== Point Breakdown ===\n");
        out.push_str(&breakdown_table(&board.breakdown));
    }

    out
}

fn standings_table(standings: &[StandingEntry]) -> String {
    let name_width = column_width("Rider", standings.iter().map(|s| s.rider_name.as_str()));
    let team_width = column_width("Team", standings.iter().map(|s| s.team.as_str()));

    let mut out = format!(
        "  {:>3}  {:<name_width$}  {:<team_width$}  {:>8}\n",
        "#", "Rider", "Team", "Points"
    );
    for (i, entry) in standings.iter().enumerate() {
        out.push_str(&format!(
            "  {:>3}  {:<name_width$}  {:<team_width$}  {:>8}\n",
            i + 1,
            entry.rider_name,
            entry.team,
            entry.points
        ));
    }
    out
}

fn breakdown_table(rows: &[BreakdownRow]) -> String {
    let race_width = column_width("Race", rows.iter().map(|r| r.race.as_str()));
    let name_width = column_width("Rider", rows.iter().map(|r| r.rider_name.as_str()));

    let mut out = format!(
        "  {:<race_width$}  {:<name_width$}  {:>4}  {:>8}\n",
        "Race", "Rider", "Rank", "Points"
    );
    for row in rows {
        out.push_str(&format!(
            "  {:<race_width$}  {:<name_width$}  {:>4}  {:>8}\n",
            row.race, row.rider_name, row.rank, row.points
        ));
    }
    out
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}
