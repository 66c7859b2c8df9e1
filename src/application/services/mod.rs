mod cooldown_tracker;
mod gateway_client;
mod rate_limiter;
mod result_cache;

pub use cooldown_tracker::*;
pub use gateway_client::*;
pub use rate_limiter::*;
pub use result_cache::*;
