//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate bind addresses and the upstream base URL
//! - Detect route paths that are malformed or collide within a role
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: (ServiceConfig, Role) → Result<(), Vec<ValidationError>>
//! - Only the running role's section is checked
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{Role, ServiceConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate the sections of a parsed configuration that `role` uses.
///
/// The other role's section is ignored, so one file can carry both.
pub fn validate_config(config: &ServiceConfig, role: Role) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match role {
        Role::Upstream => {
            let upstream = &config.upstream;
            check_bind_address("upstream.bind_address", &upstream.bind_address, &mut errors);
            check_routes(
                "upstream",
                &[
                    ("health_path", upstream.health_path()),
                    ("data_path", upstream.data_path()),
                    ("shutdown_path", upstream.shutdown_path()),
                ],
                &mut errors,
            );
        }
        Role::Relay => {
            let relay = &config.relay;
            check_bind_address("relay.bind_address", &relay.bind_address, &mut errors);
            check_routes(
                "relay",
                &[
                    ("health_path", relay.health_path()),
                    ("forward_path", relay.forward_path()),
                    ("shutdown_path", relay.shutdown_path()),
                ],
                &mut errors,
            );
            check_path("relay.upstream_path", relay.upstream_path(), &mut errors);

            match Url::parse(&relay.upstream_base_url) {
                Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
                Ok(url) => errors.push(ValidationError::new(
                    "relay.upstream_base_url",
                    format!("unsupported url '{}'", url),
                )),
                Err(e) => errors.push(ValidationError::new("relay.upstream_base_url", e.to_string())),
            }

            if relay.timeout_ms == 0 {
                errors.push(ValidationError::new("relay.timeout_ms", "must be greater than zero"));
            }
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than zero"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_bind_address(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    if let Err(e) = value.parse::<SocketAddr>() {
        errors.push(ValidationError::new(field, format!("'{}': {}", value, e)));
    }
}

fn check_path(field: &str, path: &str, errors: &mut Vec<ValidationError>) {
    if !path.starts_with('/') {
        errors.push(ValidationError::new(field, format!("'{}' must start with '/'", path)));
    }
}

fn check_routes(section: &str, routes: &[(&str, &str)], errors: &mut Vec<ValidationError>) {
    for (i, (name, path)) in routes.iter().enumerate() {
        let field = format!("{}.{}", section, name);
        check_path(&field, path, errors);
        if routes[..i].iter().any(|(_, other)| other == path) {
            errors.push(ValidationError::new(&field, format!("'{}' is already routed", path)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ServiceConfig::default();
        assert!(validate_config(&config, Role::Upstream).is_ok());
        assert!(validate_config(&config, Role::Relay).is_ok());
    }

    #[test]
    fn collects_every_relay_error() {
        let mut config = ServiceConfig::default();
        config.relay.bind_address = "not-an-address".into();
        config.relay.upstream_base_url = "ftp://localhost".into();
        config.relay.timeout_ms = 0;

        let errors = validate_config(&config, Role::Relay).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["relay.bind_address", "relay.upstream_base_url", "relay.timeout_ms"]
        );
    }

    #[test]
    fn upstream_ignores_relay_section() {
        let mut config = ServiceConfig::default();
        config.relay.upstream_base_url = "not a url".into();
        config.relay.timeout_ms = 0;

        assert!(validate_config(&config, Role::Upstream).is_ok());
        assert!(validate_config(&config, Role::Relay).is_err());
    }

    #[test]
    fn relay_ignores_upstream_section() {
        let mut config = ServiceConfig::default();
        config.upstream.bind_address = "not-an-address".into();

        assert!(validate_config(&config, Role::Relay).is_ok());
        let errors = validate_config(&config, Role::Upstream).unwrap_err();
        assert_eq!(errors[0].field, "upstream.bind_address");
    }

    #[test]
    fn shared_timeouts_checked_for_both_roles() {
        let mut config = ServiceConfig::default();
        config.timeouts.request_secs = 0;

        for role in [Role::Upstream, Role::Relay] {
            let errors = validate_config(&config, role).unwrap_err();
            assert_eq!(errors[0].field, "timeouts.request_secs");
        }
    }

    #[test]
    fn rejects_colliding_routes() {
        let mut config = ServiceConfig::default();
        config.relay.forward_path = Some("/health".into());

        let errors = validate_config(&config, Role::Relay).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "relay.forward_path");
    }

    #[test]
    fn rejects_relative_paths() {
        let mut config = ServiceConfig::default();
        config.upstream.data_path = Some("echo".into());

        let errors = validate_config(&config, Role::Upstream).unwrap_err();
        assert_eq!(errors[0].to_string(), "upstream.data_path: 'echo' must start with '/'");
    }
}
