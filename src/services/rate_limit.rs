use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

const PRUNE_THRESHOLD: usize = 1024;

struct Window {
    started: Instant,
    count: u32,
}

struct Clients {
    windows: HashMap<String, Window>,
    last_pruned: Option<Instant>,
}

/// Fixed-window request counter per client address. Every endpoint costs the same.
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    clients: Mutex<Clients>,
}

impl RateLimiter {
    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            clients: Mutex::new(Clients {
                windows: HashMap::new(),
                last_pruned: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Clients> {
        self.clients.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Counts one request for `client`; false once the window's limit is exceeded.
    pub fn check(&self, client: &str) -> bool {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> bool {
        let mut clients = self.lock();
        let window = self.window;

        // Expired windows are swept at most once per window length.
        let prune_due = clients
            .last_pruned
            .map_or(true, |at| now.duration_since(at) >= window);
        if clients.windows.len() > PRUNE_THRESHOLD && prune_due {
            clients
                .windows
                .retain(|_, w| now.duration_since(w.started) < window);
            clients.last_pruned = Some(now);
        }

        let entry = clients
            .windows
            .entry(client.to_string())
            .or_insert(Window {
                started: now,
                count: 0,
            });
        if now.duration_since(entry.started) >= window {
            entry.started = now;
            entry.count = 0;
        }
        entry.count += 1;

        entry.count <= self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl RateLimiter {
        fn tracked(&self) -> usize {
            self.lock().windows.len()
        }
    }

    #[test]
    fn test_blocks_after_limit() {
        let limiter = RateLimiter::per_minute(2);
        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.2"));
    }

    #[test]
    fn test_window_resets() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();
        assert!(limiter.check_at("a", start));
        assert!(!limiter.check_at("a", start + Duration::from_secs(30)));
        assert!(limiter.check_at("a", start + Duration::from_secs(61)));
    }

    #[test]
    fn test_sweep_runs_once_per_window() {
        let limiter = RateLimiter::new(10, Duration::from_secs(60));
        let start = Instant::now();
        let at = |secs| start + Duration::from_secs(secs);

        for i in 0..=PRUNE_THRESHOLD {
            limiter.check_at(&format!("client-{i}"), start);
        }

        // first sweep: nothing has expired yet
        limiter.check_at("first", at(10));
        assert_eq!(limiter.tracked(), PRUNE_THRESHOLD + 2);

        // the early windows have expired, but the last sweep was under a window ago
        limiter.check_at("second", at(61));
        assert_eq!(limiter.tracked(), PRUNE_THRESHOLD + 3);

        // a full window after the first sweep, expired entries go
        limiter.check_at("third", at(70));
        assert_eq!(limiter.tracked(), 2);
    }
}
