mod clock;
mod health_server;
mod mock_transport;
mod reqwest_transport;

pub use clock::*;
pub use health_server::*;
pub use mock_transport::*;
pub use reqwest_transport::*;
