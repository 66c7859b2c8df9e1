mod clock;
mod http_transport;

pub use clock::*;
pub use http_transport::*;
