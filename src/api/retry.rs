//! Per-operation retry bookkeeping.
//!
//! Counters are keyed by `method:entity_id`. A retryable failure increments
//! the key's counter; once it exceeds the configured maximum the counter is
//! cleared and the call is abandoned. Any success clears it.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tracing::{error, info, warn};

/// What to do after a retryable failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait `delay`, then make attempt number `attempt + 1`.
    Retry { attempt: u32, delay: Duration },
    /// Give up; `attempts` failures were recorded for the key.
    Abandon { attempts: u32 },
}

/// Retry counters owned by one request envelope.
#[derive(Debug)]
pub struct RetryTracker {
    max_retries: u32,
    delay: Duration,
    counts: Mutex<HashMap<String, u32>>,
}

impl RetryTracker {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            delay,
            counts: Mutex::new(HashMap::new()),
        }
    }

    fn counts(&self) -> MutexGuard<'_, HashMap<String, u32>> {
        self.counts.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record a retryable failure for `key`.
    pub fn record_failure(&self, key: &str) -> RetryDecision {
        let mut counts = self.counts();
        let count = counts.entry(key.to_string()).or_insert(0);
        *count += 1;
        let attempts = *count;

        if attempts > self.max_retries {
            counts.remove(key);
            error!(key, attempts, "Call to {} failed after {} tries", key, self.max_retries);
            RetryDecision::Abandon { attempts }
        } else {
            warn!(key, attempt = attempts, "Retry {} for {}", attempts, key);
            RetryDecision::Retry {
                attempt: attempts,
                delay: self.delay,
            }
        }
    }

    /// Record a success, returning true if the key had been failing.
    pub fn record_success(&self, key: &str) -> bool {
        match self.counts().remove(key) {
            Some(n) if n > 0 => {
                info!(key, "Call to {} succeeded", key);
                true
            }
            _ => false,
        }
    }

    /// Current failure count for `key`.
    pub fn count(&self, key: &str) -> u32 {
        self.counts().get(key).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn test_zero_max_abandons_immediately() {
        let tracker = RetryTracker::new(0, DELAY);
        assert_eq!(
            tracker.record_failure("collections.getTree:u"),
            RetryDecision::Abandon { attempts: 1 }
        );
        assert_eq!(tracker.count("collections.getTree:u"), 0);
    }

    #[test]
    fn test_abandons_after_max_retries() {
        let tracker = RetryTracker::new(2, DELAY);
        let key = "photosets.getInfo:1";

        assert_eq!(
            tracker.record_failure(key),
            RetryDecision::Retry { attempt: 1, delay: DELAY }
        );
        assert_eq!(
            tracker.record_failure(key),
            RetryDecision::Retry { attempt: 2, delay: DELAY }
        );
        assert_eq!(tracker.record_failure(key), RetryDecision::Abandon { attempts: 3 });

        // cleared after abandoning, so the next call starts over
        assert_eq!(
            tracker.record_failure(key),
            RetryDecision::Retry { attempt: 1, delay: DELAY }
        );
    }

    #[test]
    fn test_success_resets_counter() {
        let tracker = RetryTracker::new(3, DELAY);
        let key = "photos.getInfo:9";

        assert!(!tracker.record_success(key));
        tracker.record_failure(key);
        tracker.record_failure(key);
        assert_eq!(tracker.count(key), 2);

        assert!(tracker.record_success(key));
        assert_eq!(tracker.count(key), 0);
    }

    #[test]
    fn test_keys_are_independent() {
        let tracker = RetryTracker::new(1, DELAY);
        tracker.record_failure("a:1");
        assert!(matches!(tracker.record_failure("a:2"), RetryDecision::Retry { .. }));
        assert!(matches!(tracker.record_failure("a:1"), RetryDecision::Abandon { .. }));
    }
}
