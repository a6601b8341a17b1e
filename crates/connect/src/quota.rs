//! Fixed-window request quota for the gateway's rate-limited endpoints.
//!
//! The gateway allows a fixed number of requests per rolling window. A window
//! opens on the first request after the previous one has lapsed. Once the
//! quota is used, callers sleep until the window has passed (plus a small
//! buffer) and a fresh window starts.

use log::{debug, warn};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_REQUESTS_PER_WINDOW: u32 = 20;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(30);
pub const DEFAULT_BUFFER: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
struct Window {
    /// `None` until the first request of a window.
    started: Option<Instant>,
    used: u32,
}

impl Window {
    fn open(&mut self) {
        self.started = Some(Instant::now());
        self.used = 1;
    }
}

pub struct RequestQuota {
    limit: u32,
    window: Duration,
    buffer: Duration,
    state: Mutex<Window>,
}

impl RequestQuota {
    pub fn new(limit: u32, window: Duration, buffer: Duration) -> Self {
        Self {
            limit: limit.max(1),
            window,
            buffer,
            state: Mutex::new(Window::default()),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    fn lock_state(&self) -> MutexGuard<'_, Window> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Request quota mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn elapsed_in_window(&self, state: &Window) -> Option<Duration> {
        state
            .started
            .map(|started| started.elapsed())
            .filter(|elapsed| *elapsed < self.window)
    }

    /// Takes one request slot, sleeping out the current window when it is
    /// exhausted.
    pub async fn acquire(&self) {
        let wait = {
            let mut state = self.lock_state();
            match self.elapsed_in_window(&state) {
                None => {
                    state.open();
                    return;
                }
                Some(_) if state.used < self.limit => {
                    state.used += 1;
                    return;
                }
                Some(elapsed) => self.window - elapsed + self.buffer,
            }
        };

        debug!("Request quota used, waiting {:?}", wait);
        tokio::time::sleep(wait).await;
        self.lock_state().open();
    }

    /// Forgets the current window, e.g. after waiting out a gateway error.
    pub fn reset(&self) {
        *self.lock_state() = Window::default();
    }

    pub fn remaining(&self) -> u32 {
        let state = self.lock_state();
        match self.elapsed_in_window(&state) {
            Some(_) => self.limit.saturating_sub(state.used),
            None => self.limit,
        }
    }
}

impl Default for RequestQuota {
    fn default() -> Self {
        Self::new(DEFAULT_REQUESTS_PER_WINDOW, DEFAULT_WINDOW, DEFAULT_BUFFER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_requests_within_quota_do_not_wait() {
        let quota = RequestQuota::default();
        let start = Instant::now();

        for _ in 0..20 {
            quota.acquire().await;
        }

        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(quota.remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_quota_waits_for_window_plus_buffer() {
        let quota = RequestQuota::default();
        let start = Instant::now();

        for _ in 0..20 {
            quota.acquire().await;
        }
        tokio::time::advance(Duration::from_secs(10)).await;
        quota.acquire().await;

        // 10s already elapsed, so 20s of window plus the 1s buffer remain
        assert_eq!(start.elapsed(), Duration::from_secs(31));
        assert_eq!(quota.remaining(), 19);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_window_resets_without_waiting() {
        let quota = RequestQuota::new(2, Duration::from_secs(30), Duration::from_secs(1));
        quota.acquire().await;
        quota.acquire().await;
        tokio::time::advance(Duration::from_secs(45)).await;

        let before = Instant::now();
        quota.acquire().await;

        assert_eq!(before.elapsed(), Duration::ZERO);
        assert_eq!(quota.remaining(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_opens_on_first_request_not_construction() {
        let quota = RequestQuota::default();
        tokio::time::advance(Duration::from_secs(40)).await;

        let burst_start = Instant::now();
        for _ in 0..20 {
            quota.acquire().await;
        }
        assert_eq!(burst_start.elapsed(), Duration::ZERO);

        quota.acquire().await;
        assert_eq!(burst_start.elapsed(), Duration::from_secs(31));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_requests_stay_in_one_window() {
        let quota = RequestQuota::new(3, Duration::from_secs(30), Duration::from_secs(1));
        let start = Instant::now();
        quota.acquire().await;
        tokio::time::advance(Duration::from_secs(10)).await;
        quota.acquire().await;
        tokio::time::advance(Duration::from_secs(10)).await;
        quota.acquire().await;
        assert_eq!(quota.remaining(), 0);

        quota.acquire().await;
        assert_eq!(start.elapsed(), Duration::from_secs(31));
        assert_eq!(quota.remaining(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_restores_full_quota() {
        let quota = RequestQuota::new(3, Duration::from_secs(30), Duration::ZERO);
        quota.acquire().await;
        quota.acquire().await;
        quota.reset();
        assert_eq!(quota.remaining(), 3);
    }
}
