//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides applied by the binary
//!     → validation.rs (semantic checks for the chosen role)
//!     → ServiceConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Profiles supply route layouts; explicit fields override them
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    Flavor, LifecycleConfig, ObservabilityConfig, RelayConfig, RelayProfile, Role, ServiceConfig,
    TimeoutConfig, UpstreamConfig, UpstreamProfile,
};
pub use validation::{validate_config, ValidationError};
