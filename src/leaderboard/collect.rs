//! Walks the race list and gathers the top finishers of every race.

use tracing::{info, warn};

use crate::scraper::{result_url, PageFetcher, ResultCache, ResultsParser};
use crate::types::{FinisherResult, FinisherRow, Race};

/// Knobs for one pass over the race list
#[derive(Debug, Clone)]
pub struct CollectOptions {
    pub base_url: String,
    pub max_results: usize,
}

/// Fetch and extract the top finishers of one race.
///
/// Cached results are used when present and were cut at the same
/// `max_results`. Fetch failures are logged and yield no rows; they are not
/// cached, so the next run tries again.
pub async fn fetch_results<F, C>(
    race: &Race,
    fetcher: &F,
    cache: &C,
    options: &CollectOptions,
) -> Vec<FinisherResult>
where
    F: PageFetcher,
    C: ResultCache,
{
    if let Some(results) = cache.get(&race.pcs_slug, options.max_results) {
        return results;
    }

    let url = result_url(&options.base_url, &race.pcs_slug);
    let html = match fetcher.fetch(&url).await {
        Ok(html) => html,
        Err(e) => {
            warn!("No results for {} ({}): {:#}", race.race_name, url, e);
            return Vec::new();
        }
    };

    let results = ResultsParser::parse(&html, options.max_results);

    if let Err(e) = cache.put(&race.pcs_slug, options.max_results, &results) {
        warn!("Failed to cache results for {}: {:#}", race.pcs_slug, e);
    }

    results
}

/// Collect finisher rows for every race, one race at a time, in list order.
///
/// Rows keep the extractor's order within a race and are tagged with the
/// race's display name. A race without results contributes nothing.
pub async fn collect_results<F, C>(
    races: &[Race],
    fetcher: &F,
    cache: &C,
    options: &CollectOptions,
) -> Vec<FinisherRow>
where
    F: PageFetcher,
    C: ResultCache,
{
    let mut rows = Vec::new();

    for race in races {
        let results = fetch_results(race, fetcher, cache, options).await;
        info!("{}: {} finishers", race.race_name, results.len());

        rows.extend(
            results
                .into_iter()
                .map(|result| FinisherRow::new(result, &race.race_name)),
        );
    }

    rows
}
