//! Leaderboard pipeline: scrape, score, attribute, aggregate.
//!
//! Every run recomputes the leaderboard from the input tables and whatever
//! the fetcher (or cache) returns at that moment. Nothing is kept between runs.

pub mod collect;
pub mod scoring;
pub mod standings;

pub use collect::{collect_results, CollectOptions};
pub use scoring::{resolve, score};
pub use standings::{aggregate, breakdown};

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::scraper::{FileCache, NoCache, PageFetcher, ResultCache};
use crate::tables::InputTables;
use crate::types::{BreakdownRow, StandingEntry};

/// Options for one leaderboard run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub collect: CollectOptions,
    /// Drop cached results before scraping
    pub refresh: bool,
}

impl RunOptions {
    pub fn from_config(config: &AppConfig, refresh: bool) -> Self {
        Self {
            collect: CollectOptions {
                base_url: config.scraper.base_url.clone(),
                max_results: config.scraper.max_results,
            },
            refresh,
        }
    }
}

/// Standings plus the rows they were summed from
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    pub standings: Vec<StandingEntry>,
    pub breakdown: Vec<BreakdownRow>,
}

/// Result of a run that got past table loading
#[derive(Debug, Clone, PartialEq)]
pub enum LeaderboardOutcome {
    Standings(Leaderboard),
    /// No race produced a scored row for a rostered rider
    NoData,
}

/// Run the whole pipeline once.
pub async fn build_leaderboard<F, C>(
    tables: &InputTables,
    fetcher: &F,
    cache: &C,
    options: &RunOptions,
) -> LeaderboardOutcome
where
    F: PageFetcher,
    C: ResultCache,
{
    if options.refresh {
        if let Err(e) = cache.clear() {
            warn!("Failed to clear result cache: {:#}", e);
        }
    }

    info!("Scraping {} races", tables.races.len());
    let finishers = collect_results(&tables.races, fetcher, cache, &options.collect).await;
    if finishers.is_empty() {
        return LeaderboardOutcome::NoData;
    }

    let scored = score(&finishers, &tables.scoring);
    let owned = resolve(&scored, &tables.riders);
    info!(
        "{} finishers, {} scored, {} on the roster",
        finishers.len(),
        scored.len(),
        owned.len()
    );

    if owned.is_empty() {
        return LeaderboardOutcome::NoData;
    }

    LeaderboardOutcome::Standings(Leaderboard {
        standings: aggregate(&owned),
        breakdown: breakdown(&owned),
    })
}

/// Run the pipeline with the cache the configuration asks for
pub async fn run_with_config<F: PageFetcher>(
    config: &AppConfig,
    tables: &InputTables,
    fetcher: &F,
    refresh: bool,
) -> LeaderboardOutcome {
    let options = RunOptions::from_config(config, refresh);

    if config.cache.enabled {
        let cache = FileCache::new(config.cache.dir.clone(), config.cache.ttl());
        build_leaderboard(tables, fetcher, &cache, &options).await
    } else {
        build_leaderboard(tables, fetcher, &NoCache, &options).await
    }
}
