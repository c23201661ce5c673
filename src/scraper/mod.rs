//! Web scraper module for procyclingstats.com
//!
//! Fetches race result pages, extracts the top finishers and memoizes them.

pub mod cache;
pub mod fetcher;
pub mod parsers;
pub mod rate_limiter;

pub use cache::{FileCache, NoCache, ResultCache};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use parsers::{ResultsParser, DEFAULT_MAX_RESULTS};

/// Base URL for procyclingstats.com
pub const BASE_URL: &str = "https://www.procyclingstats.com";

/// Build a result page URL from a race slug
pub fn result_url(base_url: &str, slug: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        slug.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_url() {
        assert_eq!(
            result_url(BASE_URL, "race/tour-de-france/2025/stage-1"),
            "https://www.procyclingstats.com/race/tour-de-france/2025/stage-1"
        );
        assert_eq!(
            result_url("http://localhost:8000/", "/race/1"),
            "http://localhost:8000/race/1"
        );
    }
}
