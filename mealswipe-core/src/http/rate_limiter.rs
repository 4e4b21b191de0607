//! Per-host request spacing.

use dashmap::DashMap;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Keeps consecutive requests to one host at least `min_delay` apart.
pub struct RateLimiter {
    min_delay: Duration,
    /// Earliest instant the next request to each host may start.
    next_slot: DashMap<String, Instant>,
}

impl RateLimiter {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            next_slot: DashMap::new(),
        }
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// Wait for this host's slot, then reserve the following one.
    ///
    /// The reservation happens before sleeping so concurrent callers queue up
    /// behind each other instead of all waking at the same instant.
    pub async fn wait(&self, host: &str) {
        if self.min_delay.is_zero() {
            return;
        }

        let now = Instant::now();
        let slot = {
            let mut entry = self.next_slot.entry(host.to_string()).or_insert(now);
            let slot = (*entry).max(now);
            *entry = slot + self.min_delay;
            slot
        };

        if slot > now {
            tracing::debug!(host, wait_ms = (slot - now).as_millis() as u64, "rate limited");
            sleep_until(slot).await;
        }
    }

    pub fn tracked_hosts(&self) -> usize {
        self.next_slot.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_second_request_to_same_host_waits() {
        let limiter = RateLimiter::new(Duration::from_millis(200));
        let start = Instant::now();

        limiter.wait("www.themealdb.com").await;
        limiter.wait("www.themealdb.com").await;

        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hosts_are_independent() {
        let limiter = RateLimiter::new(Duration::from_millis(200));
        let start = Instant::now();

        limiter.wait("www.themealdb.com").await;
        limiter.wait("generativelanguage.googleapis.com").await;

        assert!(start.elapsed() < Duration::from_millis(200));
        assert_eq!(limiter.tracked_hosts(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_disables_limiting() {
        let limiter = RateLimiter::new(Duration::ZERO);
        limiter.wait("a").await;
        limiter.wait("a").await;
        assert_eq!(limiter.tracked_hosts(), 0);
    }
}
