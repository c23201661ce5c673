//! Minimum spacing between requests to the stats site.

use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// Keeps consecutive fetches at least `min_interval` apart.
pub struct Throttle {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Wait until the next request may go out
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let next_allowed = previous + self.min_interval;
            if next_allowed > Instant::now() {
                tokio::time::sleep_until(next_allowed).await;
            }
        }

        *last = Some(Instant::now());
    }
}
