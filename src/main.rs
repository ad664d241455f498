//! Two-tier HTTP relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────┐         ┌──────────────────────────┐
//!   Caller ───────▶│        RELAY (B)         │────────▶│       UPSTREAM (A)       │
//!                  │ health | forward | stop  │  GET    │ health | data/echo | stop│
//!   Caller ◀───────│ body or fallback (503/200)│◀────────│ 200 JSON | 500 simulated │
//!                  └──────────────────────────┘         └──────────────────────────┘
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use service_relay::config::{
    load_config, validate_config, ConfigError, Flavor, RelayProfile, Role, ServiceConfig,
    UpstreamProfile,
};
use service_relay::http::{relay, upstream};
use service_relay::lifecycle::{signals, Shutdown};
use service_relay::observability::init_logging;
use service_relay::ServiceServer;

#[derive(Parser)]
#[command(name = "service-relay")]
#[command(about = "Upstream echo service and fallback relay", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address override (e.g. 127.0.0.1:8080).
    #[arg(short, long)]
    bind: Option<String>,

    /// Directory for the service log file.
    #[arg(long)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the upstream service (Service A)
    Upstream {
        #[arg(long, value_enum)]
        profile: Option<UpstreamProfile>,
    },
    /// Run the relay service (Service B)
    Relay {
        #[arg(long, value_enum)]
        profile: Option<RelayProfile>,

        #[arg(long, value_enum)]
        flavor: Option<Flavor>,

        /// Base URL of the upstream service.
        #[arg(long)]
        upstream_url: Option<String>,
    },
}

impl Cli {
    /// Apply command-line overrides and return the selected role.
    fn apply(&self, config: &mut ServiceConfig) -> Role {
        if let Some(dir) = &self.log_dir {
            config.observability.log_dir = dir.clone();
        }

        match &self.command {
            Commands::Upstream { profile } => {
                if let Some(profile) = profile {
                    config.upstream.profile = *profile;
                }
                if let Some(bind) = &self.bind {
                    config.upstream.bind_address = bind.clone();
                }
                Role::Upstream
            }
            Commands::Relay {
                profile,
                flavor,
                upstream_url,
            } => {
                if let Some(profile) = profile {
                    config.relay.profile = *profile;
                }
                if flavor.is_some() {
                    config.relay.flavor = *flavor;
                }
                if let Some(url) = upstream_url {
                    config.relay.upstream_base_url = url.clone();
                }
                if let Some(bind) = &self.bind {
                    config.relay.bind_address = bind.clone();
                }
                Role::Relay
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    let role = cli.apply(&mut config);
    validate_config(&config, role).map_err(ConfigError::Validation)?;

    let _log_guard = init_logging(&config.observability, role)?;

    let shutdown = Shutdown::new();
    let (server, bind_address) = match role {
        Role::Upstream => (
            upstream::server(&config, &shutdown),
            config.upstream.bind_address.clone(),
        ),
        Role::Relay => (
            relay::server(&config, &shutdown)?,
            config.relay.bind_address.clone(),
        ),
    };

    let listener = ServiceServer::bind(&bind_address).await?;
    tokio::spawn(signals::wait_for_ctrl_c(shutdown.handle(Duration::ZERO)));

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
