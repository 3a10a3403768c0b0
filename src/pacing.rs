/*!
 * Request pacing for the inference service.
 *
 * The pacer enforces a minimum interval between the start of consecutive
 * requests. The first request is never delayed, and time already spent on
 * the previous request counts towards the interval.
 */

use std::time::Duration;
use tokio::time::Instant;

/// Minimum-interval limiter between inference requests
#[derive(Debug)]
pub struct RequestPacer {
    /// Minimum spacing between request starts
    interval: Duration,
    /// When the previous request was released
    last_release: Option<Instant>,
}

impl RequestPacer {
    /// Create a pacer with an explicit minimum interval
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_release: None,
        }
    }

    /// Create a pacer from a requests-per-minute budget.
    ///
    /// `None` or `Some(0)` disables pacing.
    pub fn per_minute(requests_per_minute: Option<u32>) -> Self {
        match requests_per_minute {
            Some(rpm) if rpm > 0 => Self::new(Duration::from_millis(60_000 / rpm as u64)),
            _ => Self::unlimited(),
        }
    }

    /// Create a pacer that never waits
    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until the next request may start, then mark it as released
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_release {
            let ready_at = last + self.interval;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }
        self.last_release = Some(Instant::now());
    }
}
