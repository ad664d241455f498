//! Result of a single outbound call to the upstream service.

use std::error::Error as _;

use thiserror::Error;

/// Content type recorded for a successful upstream body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Why an upstream call did not produce a usable body.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// Connect error, timeout, or any I/O failure while sending or reading.
    #[error("{}", error_chain(.0))]
    Transport(#[source] reqwest::Error),

    /// The upstream answered with something other than 200.
    #[error("upstream returned status {0}")]
    Status(u16),
}

impl ForwardError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ForwardError::Transport(e) if e.is_timeout())
    }
}

/// Flatten an error and its sources into one line.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Tagged outcome of forwarding one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamOutcome {
    Success {
        status_code: u16,
        body: String,
        content_type: &'static str,
    },
    Failure {
        /// Human-readable cause; empty when nothing better is known.
        reason: String,
    },
}

impl UpstreamOutcome {
    pub fn success(body: String) -> Self {
        UpstreamOutcome::Success {
            status_code: 200,
            body,
            content_type: JSON_CONTENT_TYPE,
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        UpstreamOutcome::Failure {
            reason: reason.into(),
        }
    }
}

impl From<Result<String, ForwardError>> for UpstreamOutcome {
    fn from(result: Result<String, ForwardError>) -> Self {
        match result {
            Ok(body) => UpstreamOutcome::success(body),
            Err(e) => UpstreamOutcome::failure(e.to_string()),
        }
    }
}
