use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::DashMap;

/// Per-origin counter for the current fixed window.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitRecord {
    pub count: u32,
    pub window_start: Instant,
}

impl RateLimitRecord {
    fn fresh(now: Instant) -> Self {
        Self { count: 1, window_start: now }
    }

    /// A record older than the window is treated as absent.
    fn is_expired(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.window_start) > window
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    /// Seconds until the origin's window ends, never less than one.
    Limited { retry_after: u64 },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }
}

/// In-memory submission throttle: at most `max_requests` per origin within a
/// window that starts at the origin's first accepted request.
///
/// State lives only in this process. It resets on restart and is not shared
/// between instances, so it is a best-effort throttle rather than a guarantee.
#[derive(Clone)]
pub struct RateLimiter {
    records: Arc<DashMap<String, RateLimitRecord>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            max_requests,
            window,
        }
    }

    pub fn check(&self, origin: &str) -> RateDecision {
        self.check_at(origin, Instant::now())
    }

    pub fn check_at(&self, origin: &str, now: Instant) -> RateDecision {
        self.prune(now);

        // the entry guard holds the origin's shard lock until the decision
        // is made, so concurrent checks for one origin are serialized
        let mut record = self
            .records
            .entry(origin.to_string())
            .or_insert_with(|| RateLimitRecord { count: 0, window_start: now });

        if record.count == 0 || record.is_expired(now, self.window) {
            *record = RateLimitRecord::fresh(now);
            return RateDecision::Allowed { remaining: self.max_requests.saturating_sub(1) };
        }

        if record.count >= self.max_requests {
            let elapsed = now.saturating_duration_since(record.window_start);
            let retry_after = self.window.saturating_sub(elapsed).as_secs_f64().ceil() as u64;
            return RateDecision::Limited { retry_after: retry_after.max(1) };
        }

        record.count += 1;
        RateDecision::Allowed { remaining: self.max_requests - record.count }
    }

    /// Drops every expired record. Runs on each check instead of a
    /// background sweeper. Racing prunes are harmless: an expired record is
    /// treated as absent whether or not it was removed.
    fn prune(&self, now: Instant) {
        let window = self.window;
        self.records.retain(|_, record| !record.is_expired(now, window));
    }

    pub fn tracked_origins(&self) -> usize {
        self.records.len()
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
