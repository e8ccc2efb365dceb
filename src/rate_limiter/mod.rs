use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Spaces consecutive requests at least `delay` apart so the public API never
/// sees bursts.
pub struct RateLimiter {
    delay: Duration,
    last_request: Option<Instant>,
    request_count: usize,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            last_request: None,
            request_count: 0,
        }
    }

    pub async fn wait(&mut self) {
        if let Some(ready_at) = self.next_slot() {
            sleep_until(ready_at).await;
        }
        self.record();
    }

    pub fn request_count(&self) -> usize {
        self.request_count
    }

    fn next_slot(&self) -> Option<Instant> {
        let ready_at = self.last_request? + self.delay;
        (ready_at > Instant::now()).then_some(ready_at)
    }

    fn record(&mut self) {
        self.last_request = Some(Instant::now());
        self.request_count += 1;
    }
}
