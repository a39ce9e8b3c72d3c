use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

/// Hit-and-check rate limiting over opaque string keys.
///
/// `too_many_attempts` is checked before `hit`, matching request-level
/// throttling semantics: a rejected request does not consume an attempt.
pub trait RateLimiter: Send + Sync {
    fn too_many_attempts(&self, key: &str, max_attempts: u32) -> bool;

    /// Record one attempt; the counter window resets `decay` after the
    /// first hit.
    fn hit(&self, key: &str, decay: Duration);
}

struct Window {
    hits: u32,
    resets_at: Instant,
}

/// Fixed-window counters in process memory, the default backend.
#[derive(Default)]
pub struct InMemoryRateLimiter {
    windows: Mutex<HashMap<String, Window>>,
}

impl InMemoryRateLimiter {
    pub fn new() -> Self {
        InMemoryRateLimiter::default()
    }

    /// Attempts recorded for `key` in the current window.
    pub fn attempts(&self, key: &str) -> u32 {
        let windows = self.lock();
        windows
            .get(key)
            .filter(|w| w.resets_at > Instant::now())
            .map(|w| w.hits)
            .unwrap_or(0)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Window>> {
        match self.windows.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl RateLimiter for InMemoryRateLimiter {
    fn too_many_attempts(&self, key: &str, max_attempts: u32) -> bool {
        let mut windows = self.lock();
        match windows.get(key) {
            Some(window) if window.resets_at > Instant::now() => window.hits >= max_attempts,
            Some(_) => {
                windows.remove(key);
                false
            }
            None => false,
        }
    }

    fn hit(&self, key: &str, decay: Duration) {
        let mut windows = self.lock();
        let now = Instant::now();
        let window = windows.entry(key.to_string()).or_insert(Window {
            hits: 0,
            resets_at: now + decay,
        });
        if window.resets_at <= now {
            window.hits = 0;
            window.resets_at = now + decay;
        }
        window.hits += 1;
    }
}
