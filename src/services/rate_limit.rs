//! Per-client login attempt limiter.

use crate::config::LoginRateLimitConfig;
use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

type AttemptLog = HashMap<String, VecDeque<Instant>>;

/// In-memory sliding-window limiter keyed by client address
///
/// Every login attempt is timestamped. A client is blocked while it has
/// `max_attempts` or more timestamps inside the trailing window. Stale
/// timestamps are pruned lazily, only for the client being checked, and a
/// client's key stays in the map until [`reset`](Self::reset) removes it.
///
/// Cloning is cheap and every clone shares the same history, so one limiter
/// built at startup serves all worker threads.
#[derive(Clone)]
pub struct LoginRateLimiter {
    config: LoginRateLimitConfig,
    attempts: Arc<Mutex<AttemptLog>>,
}

impl LoginRateLimiter {
    /// Create a new limiter with the given configuration
    pub fn new(config: LoginRateLimitConfig) -> Self {
        Self {
            config,
            attempts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &LoginRateLimitConfig {
        &self.config
    }

    /// Whether `client_id` has exhausted its quota for the current window
    pub fn is_blocked(&self, client_id: &str) -> bool {
        self.is_blocked_at(client_id, Instant::now())
    }

    pub fn is_blocked_at(&self, client_id: &str, now: Instant) -> bool {
        let mut attempts = self.lock();
        match attempts.get_mut(client_id) {
            Some(history) => {
                prune(history, now, self.config.window());
                history.len() >= self.config.max_attempts
            }
            None => false,
        }
    }

    /// Append an attempt for `client_id`
    pub fn record_attempt(&self, client_id: &str) {
        self.record_attempt_at(client_id, Instant::now());
    }

    pub fn record_attempt_at(&self, client_id: &str, now: Instant) {
        let mut attempts = self.lock();
        let history = attempts.entry(client_id.to_string()).or_default();
        prune(history, now, self.config.window());
        history.push_back(now);
    }

    /// Check the quota and record the attempt in one step
    ///
    /// Returns `true` when the client was already blocked before this attempt.
    /// The attempt is recorded either way, so a blocked client that keeps
    /// trying stays blocked. Holding the lock across both steps keeps
    /// concurrent requests from one address from slipping past the limit.
    pub fn check_and_record(&self, client_id: &str) -> bool {
        self.check_and_record_at(client_id, Instant::now())
    }

    pub fn check_and_record_at(&self, client_id: &str, now: Instant) -> bool {
        let mut attempts = self.lock();
        let history = attempts.entry(client_id.to_string()).or_default();
        prune(history, now, self.config.window());
        let blocked = history.len() >= self.config.max_attempts;
        history.push_back(now);
        blocked
    }

    /// Forget all attempts for `client_id`
    pub fn reset(&self, client_id: &str) {
        self.lock().remove(client_id);
    }

    /// Attempts currently counted against `client_id`, without pruning
    pub fn attempts_in_window(&self, client_id: &str) -> usize {
        self.attempts_in_window_at(client_id, Instant::now())
    }

    pub fn attempts_in_window_at(&self, client_id: &str, now: Instant) -> usize {
        let window = self.config.window();
        self.lock()
            .get(client_id)
            .map(|history| {
                history
                    .iter()
                    .filter(|at| now.saturating_duration_since(**at) < window)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Number of client keys held, including ones whose history has emptied
    pub fn tracked_clients(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, AttemptLog> {
        // The map holds plain timestamps, so a panic elsewhere cannot leave it
        // half-updated in a way that matters
        self.attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Drop timestamps that have aged out of the window
///
/// Timestamps are appended in arrival order, so stale ones sit at the front.
fn prune(history: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(oldest) = history.front() {
        if now.saturating_duration_since(*oldest) >= window {
            history.pop_front();
        } else {
            break;
        }
    }
}
