//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (middleware: trace, access log, timeout, panic catch)
//!     → request.rs (query → RequestParams)
//!     → upstream.rs | relay.rs (service handlers)
//!     → response.rs (fixed text, JSON, fallback body)
//!     → Send to client
//! ```

pub mod relay;
pub mod request;
pub mod response;
pub mod server;
pub mod upstream;

pub use request::RequestParams;
pub use server::{ServerError, ServiceServer};
