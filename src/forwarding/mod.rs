//! Forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! RequestParams (msg, fail)
//!     → client.rs (build URL, single GET with timeout)
//!     → outcome.rs (Success{body} | Failure{reason})
//!     → relay handler decides the response
//! ```

pub mod client;
pub mod outcome;

pub use client::{ClientBuildError, ForwardingClient};
pub use outcome::{ForwardError, UpstreamOutcome, JSON_CONTENT_TYPE};
