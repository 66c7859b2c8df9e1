/// Length of one rate-limit window.
pub const RATE_WINDOW_MS: u64 = 60_000;

/// Calls admitted in the current fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateWindow {
    count: u32,
    window_start_ms: u64,
}

impl RateWindow {
    pub fn new(now_ms: u64) -> Self {
        Self {
            count: 0,
            window_start_ms: now_ms,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn window_start_ms(&self) -> u64 {
        self.window_start_ms
    }

    /// Starts a fresh window once a full window has elapsed.
    pub fn roll(&mut self, now_ms: u64) {
        if now_ms.saturating_sub(self.window_start_ms) >= RATE_WINDOW_MS {
            self.count = 0;
            self.window_start_ms = now_ms;
        }
    }

    /// Admits one call if the window still has room. A refusal leaves the
    /// count untouched.
    pub fn try_consume(&mut self, now_ms: u64, limit: u32) -> bool {
        self.roll(now_ms);
        if self.count >= limit {
            return false;
        }
        self.count += 1;
        true
    }

    /// Milliseconds until the current window rolls over.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        RATE_WINDOW_MS.saturating_sub(now_ms.saturating_sub(self.window_start_ms))
    }
}
