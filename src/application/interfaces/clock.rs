/// Wall-clock source for windows and expiries, injectable so tests can
/// advance time.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;
}
