//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and clients produce:
//!     → logging.rs (structured log events, access records)
//!
//! Consumers:
//!     → stdout
//!     → append-only log file per service instance
//! ```

pub mod logging;

pub use logging::{init_logging, record_request, LoggingError};
