//! Outbound request throttling.
//!
//! `RateLimiter` admits at most `permits` calls in any window of `window`
//! length. It remembers when each of the last `permits` calls was admitted;
//! a caller that finds the window full sleeps until the oldest admission
//! ages out. Sleeping happens while holding the state lock, so waiters are
//! released roughly in arrival order.
//!
//! The limiter is owned by the client that uses it and injected at
//! construction. `Unthrottled` is the no-op stand-in for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// Gate every outbound call passes before dispatch. Never fails, only delays.
pub trait Throttle: Send + Sync {
    fn acquire(&self);
}

/// Time source for the limiter.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Throttle that never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unthrottled;

impl Throttle for Unthrottled {
    fn acquire(&self) {}
}

/// Sliding-window limiter: `permits` admissions per `window`.
pub struct RateLimiter<C: Clock = SystemClock> {
    permits: usize,
    window: Duration,
    admitted: Mutex<VecDeque<Instant>>,
    clock: Arc<C>,
}

impl RateLimiter<SystemClock> {
    pub fn new(permits: u32, window: Duration) -> Self {
        Self::with_clock(permits, window, SystemClock)
    }
}

impl<C: Clock> RateLimiter<C> {
    /// A zero `permits` is treated as one so `acquire` always terminates.
    pub fn with_clock(permits: u32, window: Duration, clock: C) -> Self {
        let permits = permits.max(1) as usize;
        Self {
            permits,
            window,
            admitted: Mutex::new(VecDeque::with_capacity(permits)),
            clock: Arc::new(clock),
        }
    }

    pub fn permits(&self) -> usize {
        self.permits
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl<C: Clock> Throttle for RateLimiter<C> {
    fn acquire(&self) {
        let mut admitted = match self.admitted.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("rate limiter lock poisoned");
                poisoned.into_inner()
            }
        };

        loop {
            let now = self.clock.now();
            while admitted
                .front()
                .is_some_and(|t| now.saturating_duration_since(*t) >= self.window)
            {
                admitted.pop_front();
            }

            if admitted.len() < self.permits {
                admitted.push_back(now);
                return;
            }

            // Window is full; the oldest admission frees the next slot.
            if let Some(oldest) = admitted.front().copied() {
                let wait = self.window.saturating_sub(now.saturating_duration_since(oldest));
                debug!(?wait, "rate limit reached, waiting");
                self.clock.sleep(wait);
            }
        }
    }
}

impl<C: Clock> std::fmt::Debug for RateLimiter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("permits", &self.permits)
            .field("window", &self.window)
            .finish()
    }
}
