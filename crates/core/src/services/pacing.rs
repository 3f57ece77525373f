use std::time::Duration;

use tokio::time::{sleep, Instant};

/// Default spacing between per-pair price requests.
pub const DEFAULT_PACE: Duration = Duration::from_millis(1500);

/// Sequential request-pacing policy for upstream rate limits.
///
/// [`pace`](Pacer::pace) returns immediately the first time and afterwards
/// sleeps until at least `min_interval` has elapsed since the previous call.
/// One explicit policy object instead of sleeps scattered through a loop
/// body, so the pacing contract is testable on its own.
#[derive(Debug)]
pub struct Pacer {
    min_interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// Block until the minimum interval since the previous call has passed.
    pub async fn pace(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last = Some(Instant::now());
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(DEFAULT_PACE)
    }
}
