//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown route:
//!     Respond → schedule() → grace delay (separate task) → trigger → stop accepting → drain → exit
//!
//! Signals (signals.rs):
//!     SIGINT → trigger immediately
//! ```
//!
//! # Design Decisions
//! - The server handle is owned state passed to handlers, not a global
//! - Shutdown is requested at most once; later requests are answered but ignored

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownHandle};
