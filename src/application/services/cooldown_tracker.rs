use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::debug;

use crate::application::Clock;

/// Cooldown applied to commands without an explicit one.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(3);

/// Per-user, per-command cooldowns. Each entry holds the instant its
/// cooldown ends and is dropped on the first check after that.
pub struct CooldownTracker {
    expires_at: Mutex<HashMap<(String, String), u64>>,
    clock: Arc<dyn Clock>,
}

impl CooldownTracker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            expires_at: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Accepts and records a use of `command` by `user`, or refuses it with
    /// the time left. A refusal does not extend the cooldown.
    pub async fn check(
        &self,
        command: &str,
        user: &str,
        cooldown: Duration,
    ) -> Result<(), Duration> {
        let mut expires_at = self.expires_at.lock().await;
        let now = self.clock.now_millis();
        expires_at.retain(|_, until| *until > now);

        let key = (command.to_string(), user.to_string());
        if let Some(&until) = expires_at.get(&key) {
            let remaining = Duration::from_millis(until - now);
            debug!("{} is cooling down for {} ({:?} left)", command, user, remaining);
            return Err(remaining);
        }

        expires_at.insert(key, now.saturating_add(cooldown.as_millis() as u64));
        Ok(())
    }
}

/// Cooldown for each relay command.
pub fn cooldown_for(command: &str) -> Duration {
    match command {
        "ask" | "models" => Duration::from_secs(15),
        "status" => Duration::from_secs(10),
        "ping" => Duration::from_secs(5),
        _ => DEFAULT_COOLDOWN,
    }
}
