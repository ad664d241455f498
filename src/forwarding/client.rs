//! Outbound client for the upstream service.
//!
//! # Responsibilities
//! - Build the upstream URL from the inbound parameters
//! - Issue exactly one GET per inbound request, bounded by a timeout
//! - Classify the response into an `UpstreamOutcome`
//!
//! # Design Decisions
//! - No retries: a single attempt is the whole contract
//! - Proxy environment variables are ignored; the upstream is addressed directly
//! - Inbound disconnects do not cancel the call; the relay awaits it to completion

use std::time::Duration;

use reqwest::StatusCode;
use url::{form_urlencoded, Url};

use crate::config::RelayConfig;
use crate::forwarding::outcome::{ForwardError, UpstreamOutcome};
use crate::http::request::RequestParams;

/// Client that forwards relay requests to the upstream data/echo route.
#[derive(Debug, Clone)]
pub struct ForwardingClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ForwardingClient {
    /// Create a client targeting `base_url` + `path`.
    pub fn new(base_url: &Url, path: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .no_proxy()
            .build()?;

        let endpoint = format!("{}{}", base_url.as_str().trim_end_matches('/'), path);

        Ok(Self { client, endpoint })
    }

    /// Create a client from the relay section of the configuration.
    pub fn from_config(config: &RelayConfig) -> Result<Self, ClientBuildError> {
        let base_url = Url::parse(&config.upstream_base_url)?;
        let client = Self::new(
            &base_url,
            config.upstream_path(),
            Duration::from_millis(config.timeout_ms),
        )?;
        Ok(client)
    }

    /// Upstream URL for the given parameters.
    ///
    /// `msg` is always present; `fail=true` is appended only when requested so
    /// the upstream exercises its own failure path.
    pub fn target_url(&self, params: &RequestParams) -> String {
        let mut target = format!("{}?msg={}", self.endpoint, encode(params.msg()));
        if params.fail() {
            target.push_str("&fail=true");
        }
        target
    }

    /// Forward one request and classify what came back.
    pub async fn forward(&self, params: &RequestParams) -> UpstreamOutcome {
        let target = self.target_url(params);
        let result = self.call(&target).await;

        if let Err(e) = &result {
            match e {
                ForwardError::Status(status) => tracing::warn!(
                    target_url = %target,
                    status,
                    "Call to upstream failed: {}",
                    e
                ),
                ForwardError::Transport(_) => tracing::warn!(
                    target_url = %target,
                    timeout = e.is_timeout(),
                    error = %e,
                    "Error calling upstream"
                ),
            }
        }

        UpstreamOutcome::from(result)
    }

    async fn call(&self, target: &str) -> Result<String, ForwardError> {
        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(ForwardError::Transport)?;

        let status = response.status();
        let body = response.bytes().await;

        if status != StatusCode::OK {
            // Body is drained and discarded so the connection can be reused.
            return Err(ForwardError::Status(status.as_u16()));
        }

        let body = body.map_err(ForwardError::Transport)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Form-encode a value for a query string.
fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Error building a `ForwardingClient` from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("invalid upstream url: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}
