//! Race result caches.
//!
//! The pipeline works the same with or without a cache; a cache only saves
//! network round trips when the leaderboard is rebuilt within the TTL.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::types::FinisherResult;

/// Memoizes extracted results per race slug and top-N cutoff
pub trait ResultCache {
    fn get(&self, slug: &str, max_results: usize) -> Option<Vec<FinisherResult>>;
    fn put(&self, slug: &str, max_results: usize, results: &[FinisherResult]) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Cache that never holds anything
pub struct NoCache;

impl ResultCache for NoCache {
    fn get(&self, _slug: &str, _max_results: usize) -> Option<Vec<FinisherResult>> {
        None
    }

    fn put(&self, _slug: &str, _max_results: usize, _results: &[FinisherResult]) -> Result<()> {
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        Ok(())
    }
}

/// Cache entry with timestamp
#[derive(Serialize, Deserialize)]
struct CacheEntry<T> {
    slug: String,
    /// Cutoff the entry was extracted with
    max_results: usize,
    data: T,
    cached_at: DateTime<Utc>,
}

/// JSON file per race, expired after `ttl`
pub struct FileCache {
    base_dir: PathBuf,
    ttl: Duration,
}

impl FileCache {
    pub fn new(base_dir: PathBuf, ttl: Duration) -> Self {
        Self { base_dir, ttl }
    }

    /// Slugs contain slashes; flatten them into a single file name
    fn cache_path(&self, slug: &str) -> PathBuf {
        let file_name: String = slug
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.base_dir.join(format!("{}.json", file_name))
    }
}

impl ResultCache for FileCache {
    fn get(&self, slug: &str, max_results: usize) -> Option<Vec<FinisherResult>> {
        let path = self.cache_path(slug);

        if !path.exists() {
            return None;
        }

        let content = std::fs::read_to_string(&path).ok()?;
        let entry: CacheEntry<Vec<FinisherResult>> = serde_json::from_str(&content).ok()?;

        // Two slugs may flatten to the same file
        if entry.slug != slug {
            return None;
        }

        if entry.max_results != max_results {
            debug!(
                "Cached {} was cut at {} results, want {}",
                slug, entry.max_results, max_results
            );
            return None;
        }

        if Utc::now() - entry.cached_at > self.ttl {
            let _ = std::fs::remove_file(&path);
            return None;
        }

        debug!("Cache hit for {}", slug);
        Some(entry.data)
    }

    fn put(&self, slug: &str, max_results: usize, results: &[FinisherResult]) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir)?;

        let entry = CacheEntry {
            slug: slug.to_string(),
            max_results,
            data: results,
            cached_at: Utc::now(),
        };

        let content = serde_json::to_string_pretty(&entry)?;
        std::fs::write(self.cache_path(slug), content)?;

        Ok(())
    }

    /// Remove the cache's own entries; anything else in the directory stays
    fn clear(&self) -> Result<()> {
        if !self.base_dir.exists() {
            return Ok(());
        }

        for dir_entry in std::fs::read_dir(&self.base_dir)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let is_entry = std::fs::read_to_string(&path)
                .ok()
                .and_then(|content| {
                    serde_json::from_str::<CacheEntry<Vec<FinisherResult>>>(&content).ok()
                })
                .is_some();
            if is_entry {
                std::fs::remove_file(&path)?;
            }
        }

        // Only succeeds when nothing else lives there
        let _ = std::fs::remove_dir(&self.base_dir);
        Ok(())
    }
}
