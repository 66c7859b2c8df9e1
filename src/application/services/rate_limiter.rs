use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::warn;

use crate::application::Clock;
use crate::domain::{GatewayError, RateWindow};

/// Bounds outbound calls per fixed 60-second window.
///
/// Refused callers fail immediately; nothing is queued.
pub struct RateLimiter {
    window: Mutex<RateWindow>,
    limit: u32,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(limit: u32, clock: Arc<dyn Clock>) -> Self {
        let window = RateWindow::new(clock.now_millis());
        Self {
            window: Mutex::new(window),
            limit: limit.max(1),
            clock,
        }
    }

    pub async fn check_and_consume(&self) -> Result<(), GatewayError> {
        let mut window = self.window.lock().await;
        let now = self.clock.now_millis();

        if window.try_consume(now, self.limit) {
            return Ok(());
        }

        warn!(
            "Local rate limit reached ({} per minute), window rolls over in {}ms",
            self.limit,
            window.remaining_ms(now)
        );
        Err(GatewayError::rate_limited(format!(
            "Maximum {} requests per minute.",
            self.limit
        )))
    }

    /// Calls admitted in the current window.
    #[cfg(test)]
    pub(crate) async fn used(&self) -> u32 {
        self.window.lock().await.count()
    }
}
