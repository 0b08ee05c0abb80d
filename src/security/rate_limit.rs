//! Per-client sliding-window rate limiting.
//!
//! One concurrent map keyed by client IP holds both the last-seen
//! timestamp and the in-window count, so the two can never drift apart.
//! The dashmap entry API holds the shard lock across the
//! check-then-increment, which makes admission linearizable per key while
//! leaving unrelated clients on other shards unblocked.
//!
//! Eviction of expired entries runs inline on every call rather than in a
//! background sweeper. That bounds memory to the distinct clients seen in
//! the last minute at the cost of an O(active clients) sweep per request:
//! fine for the tens-to-low-hundreds of clients this API serves, a known
//! ceiling for anything internet-scale.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::telemetry::now_ms;

/// Length of the trailing admission window.
pub const WINDOW_MS: u64 = 60_000;

/// Book-keeping for one client inside the current window.
struct ClientState {
    last_seen_ms: u64,
    count_in_window: u32,
}

/// Sliding-window request counter with time-based eviction.
pub struct RateLimiter {
    clients: DashMap<String, ClientState>,
    requests_per_minute: u32,
}

impl RateLimiter {
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            clients: DashMap::new(),
            requests_per_minute,
        }
    }

    /// Admit or reject a request from `client_key` at the current time.
    pub fn admit(&self, client_key: &str) -> bool {
        self.admit_at(client_key, now_ms())
    }

    /// Admission with an injected clock, so window algebra is testable
    /// without sleeping.
    pub fn admit_at(&self, client_key: &str, now_ms: u64) -> bool {
        // Drop every client idle for longer than the window. The same map
        // carries timestamp and count, so eviction can't orphan a counter.
        self.clients
            .retain(|_, state| now_ms.saturating_sub(state.last_seen_ms) <= WINDOW_MS);

        match self.clients.entry(client_key.to_string()) {
            Entry::Occupied(mut entry) => {
                let state = entry.get_mut();
                if state.count_in_window >= self.requests_per_minute {
                    // Rejections leave state untouched.
                    return false;
                }
                state.last_seen_ms = now_ms;
                state.count_in_window += 1;
                true
            }
            Entry::Vacant(entry) => {
                if self.requests_per_minute == 0 {
                    return false;
                }
                entry.insert(ClientState {
                    last_seen_ms: now_ms,
                    count_in_window: 1,
                });
                true
            }
        }
    }

    /// Number of clients currently tracked (inside the window).
    pub fn active_clients(&self) -> usize {
        self.clients.len()
    }
}
