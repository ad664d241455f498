//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for both service
//! roles. All types derive Serde traits for deserialization from config files.
//!
//! Route paths are optional overrides: when unset, the selected profile
//! supplies them, so the two observed route layouts are plain data rather
//! than separate implementations.

use serde::{Deserialize, Serialize};

/// Root configuration shared by the upstream and relay roles.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Upstream service ("Service A") settings.
    pub upstream: UpstreamConfig,

    /// Relay service ("Service B") settings.
    pub relay: RelayConfig,

    /// Server-side timeouts.
    pub timeouts: TimeoutConfig,

    /// Shutdown behaviour.
    pub lifecycle: LifecycleConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Which service a process runs as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Upstream,
    Relay,
}

impl Role {
    /// Log file used when `observability.log_file` is unset.
    pub fn default_log_file(&self) -> &'static str {
        match self {
            Role::Upstream => "serviceA.log",
            Role::Relay => "serviceB.log",
        }
    }
}

/// Route layout and payload shape of the upstream service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum UpstreamProfile {
    /// `/health`, `/echo`; success body echoes `msg`.
    #[default]
    Echo,
    /// `/status`, `/data`; success body carries a static greeting.
    Data,
}

/// Route layout of the relay service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RelayProfile {
    /// `/health`, `/call-echo` forwarding to the upstream `/echo`.
    #[default]
    CallEcho,
    /// `/status`, `/fetch` forwarding to the upstream `/data`.
    Fetch,
}

/// How the relay surfaces an unavailable upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Flavor {
    /// Fallback body with status 503.
    Strict,
    /// Fallback body with status 200.
    Lenient,
}

/// Upstream service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Display name used in health/shutdown bodies and logs.
    pub name: String,

    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Route layout and payload shape.
    pub profile: UpstreamProfile,

    /// Health route override.
    pub health_path: Option<String>,

    /// Data/echo route override.
    pub data_path: Option<String>,

    /// Shutdown route override.
    pub shutdown_path: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            name: "Service A".to_string(),
            bind_address: "0.0.0.0:8080".to_string(),
            profile: UpstreamProfile::default(),
            health_path: None,
            data_path: None,
            shutdown_path: None,
        }
    }
}

impl UpstreamConfig {
    pub fn health_path(&self) -> &str {
        self.health_path.as_deref().unwrap_or(match self.profile {
            UpstreamProfile::Echo => "/health",
            UpstreamProfile::Data => "/status",
        })
    }

    pub fn data_path(&self) -> &str {
        self.data_path.as_deref().unwrap_or(match self.profile {
            UpstreamProfile::Echo => "/echo",
            UpstreamProfile::Data => "/data",
        })
    }

    pub fn shutdown_path(&self) -> &str {
        self.shutdown_path.as_deref().unwrap_or("/shutdown")
    }
}

/// Relay service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Display name used in health/shutdown bodies and logs.
    pub name: String,

    /// Bind address (e.g., "0.0.0.0:8081").
    pub bind_address: String,

    /// Route layout.
    pub profile: RelayProfile,

    /// Failure surfacing override; the profile decides when unset.
    pub flavor: Option<Flavor>,

    /// Health route override.
    pub health_path: Option<String>,

    /// Forwarding route override.
    pub forward_path: Option<String>,

    /// Shutdown route override.
    pub shutdown_path: Option<String>,

    /// Base URL of the upstream service (scheme + authority).
    pub upstream_base_url: String,

    /// Upstream data/echo route override.
    pub upstream_path: Option<String>,

    /// Outbound call timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            name: "Service B".to_string(),
            bind_address: "0.0.0.0:8081".to_string(),
            profile: RelayProfile::default(),
            flavor: None,
            health_path: None,
            forward_path: None,
            shutdown_path: None,
            upstream_base_url: "http://localhost:8080".to_string(),
            upstream_path: None,
            timeout_ms: 2000,
        }
    }
}

impl RelayConfig {
    pub fn flavor(&self) -> Flavor {
        self.flavor.unwrap_or(match self.profile {
            RelayProfile::CallEcho => Flavor::Strict,
            RelayProfile::Fetch => Flavor::Lenient,
        })
    }

    pub fn health_path(&self) -> &str {
        self.health_path.as_deref().unwrap_or(match self.profile {
            RelayProfile::CallEcho => "/health",
            RelayProfile::Fetch => "/status",
        })
    }

    pub fn forward_path(&self) -> &str {
        self.forward_path.as_deref().unwrap_or(match self.profile {
            RelayProfile::CallEcho => "/call-echo",
            RelayProfile::Fetch => "/fetch",
        })
    }

    pub fn shutdown_path(&self) -> &str {
        self.shutdown_path.as_deref().unwrap_or("/shutdown")
    }

    pub fn upstream_path(&self) -> &str {
        self.upstream_path.as_deref().unwrap_or(match self.profile {
            RelayProfile::CallEcho => "/echo",
            RelayProfile::Fetch => "/data",
        })
    }
}

/// Server-side timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Delay between answering a shutdown request and stopping the listener.
    pub shutdown_grace_ms: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            shutdown_grace_ms: 1000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Write an append-only log file next to console output.
    pub file_logging: bool,

    /// Directory holding the log file.
    pub log_dir: String,

    /// Log file name; the role decides when unset.
    pub log_file: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            file_logging: true,
            log_dir: ".".to_string(),
            log_file: None,
        }
    }
}
