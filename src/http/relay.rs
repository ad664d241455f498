//! Relay service ("Service B").
//!
//! # Responsibilities
//! - Answer health checks independently of the upstream
//! - Forward the data/echo call through `ForwardingClient`
//! - Substitute the fallback body when the upstream fails
//!
//! # Design Decisions
//! - The outbound call runs on its own task; a caller that disconnects does
//!   not cancel it
//! - Upstream failures never escape as errors; both flavors answer with the
//!   same fallback shape and differ only in status code

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{any, get},
    Router,
};

use crate::config::{Flavor, RelayConfig, ServiceConfig};
use crate::forwarding::{ClientBuildError, ForwardingClient, UpstreamOutcome};
use crate::http::request::RequestParams;
use crate::http::response::{
    build_response, fallback_body, health_response, json_response, shutdown_response,
};
use crate::http::server::ServiceServer;
use crate::lifecycle::{Shutdown, ShutdownHandle};

#[derive(Debug, Clone)]
struct RelayState {
    name: Arc<str>,
    flavor: Flavor,
    client: ForwardingClient,
    shutdown: ShutdownHandle,
}

/// Routes of the relay service.
pub fn router(config: &RelayConfig, client: ForwardingClient, shutdown: ShutdownHandle) -> Router {
    let state = RelayState {
        name: Arc::from(config.name.as_str()),
        flavor: config.flavor(),
        client,
        shutdown,
    };

    Router::new()
        .route(config.health_path(), get(health))
        .route(config.forward_path(), get(forward))
        .route(config.shutdown_path(), any(shutdown_route))
        .with_state(state)
}

/// Fully layered relay server.
pub fn server(config: &ServiceConfig, shutdown: &Shutdown) -> Result<ServiceServer, ClientBuildError> {
    let client = ForwardingClient::from_config(&config.relay)?;
    let handle = shutdown.handle(Duration::from_millis(config.lifecycle.shutdown_grace_ms));
    Ok(ServiceServer::new(
        &config.relay.name,
        router(&config.relay, client, handle),
        &config.timeouts,
    ))
}

/// Status code of a fallback response for `flavor`.
pub fn fallback_status(flavor: Flavor) -> StatusCode {
    match flavor {
        Flavor::Strict => StatusCode::SERVICE_UNAVAILABLE,
        Flavor::Lenient => StatusCode::OK,
    }
}

/// Map an upstream outcome to the relay's response.
pub fn relay_response(flavor: Flavor, outcome: UpstreamOutcome) -> Response {
    match outcome {
        UpstreamOutcome::Success {
            body, content_type, ..
        } => build_response(StatusCode::OK, content_type, body),
        UpstreamOutcome::Failure { reason } => {
            json_response(fallback_status(flavor), fallback_body(&reason))
        }
    }
}

async fn health(State(state): State<RelayState>) -> Response {
    health_response(&state.name)
}

async fn forward(State(state): State<RelayState>, params: RequestParams) -> Response {
    let client = state.client.clone();
    let call = tokio::spawn(async move { client.forward(&params).await });

    let outcome = match call.await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(service = %state.name, error = %e, "Forwarding task failed");
            UpstreamOutcome::failure(e.to_string())
        }
    };

    relay_response(state.flavor, outcome)
}

async fn shutdown_route(State(state): State<RelayState>) -> Response {
    if state.shutdown.schedule() {
        tracing::warn!(service = %state.name, "Received shutdown request; stopping server");
    }
    shutdown_response(&state.name)
}
