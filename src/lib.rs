pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::Commands;

pub use application::{
    Clock, CooldownTracker, GatewayClient, HttpMethod, HttpRequest, HttpResponse, HttpTransport,
    RateLimiter, ResultCache, TransportError,
};

pub use connector::api::{Container, ContainerConfig, RelayCommand, Router};
pub use connector::{
    health_router, ManualClock, MockTransport, ReqwestTransport, SystemClock,
};

pub use domain::{
    GatewayConfig, GatewayError, ModelDescriptor, NormalizedResponse, ResponseNormalizer,
    ServiceState, SystemStatus, UNKNOWN_MODEL,
};
