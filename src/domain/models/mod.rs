mod gateway_config;
mod model_descriptor;
mod normalized_response;
mod rate_window;
mod system_status;

pub use gateway_config::*;
pub use model_descriptor::*;
pub use normalized_response::*;
pub use rate_window::*;
pub use system_status::*;
