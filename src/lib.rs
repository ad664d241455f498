//! Two-tier HTTP relay.
//!
//! An upstream service answers health checks and a data/echo route that can
//! simulate failure on request. A relay service forwards its callers to the
//! upstream and substitutes a stable fallback body when the upstream is
//! unreachable or errors.

pub mod config;
pub mod forwarding;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use forwarding::{ForwardingClient, UpstreamOutcome};
pub use http::{RequestParams, ServiceServer};
pub use lifecycle::Shutdown;
