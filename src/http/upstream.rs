//! Upstream service ("Service A").
//!
//! Answers health checks and the data/echo route. `fail=true` on the data
//! route simulates a server error in-band.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{any, get},
    Router,
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::config::{ServiceConfig, UpstreamConfig, UpstreamProfile};
use crate::http::request::RequestParams;
use crate::http::response::{
    health_response, json_response, shutdown_response, SIMULATED_FAILURE_BODY,
};
use crate::http::server::ServiceServer;
use crate::lifecycle::{Shutdown, ShutdownHandle};

#[derive(Debug, Clone)]
struct UpstreamState {
    name: Arc<str>,
    profile: UpstreamProfile,
    data_path: Arc<str>,
    shutdown: ShutdownHandle,
}

/// Routes of the upstream service.
pub fn router(config: &UpstreamConfig, shutdown: ShutdownHandle) -> Router {
    let state = UpstreamState {
        name: Arc::from(config.name.as_str()),
        profile: config.profile,
        data_path: Arc::from(config.data_path()),
        shutdown,
    };

    Router::new()
        .route(config.health_path(), get(health))
        .route(config.data_path(), get(data))
        .route(config.shutdown_path(), any(shutdown_route))
        .with_state(state)
}

/// Fully layered upstream server.
pub fn server(config: &ServiceConfig, shutdown: &Shutdown) -> ServiceServer {
    let handle = shutdown.handle(Duration::from_millis(config.lifecycle.shutdown_grace_ms));
    ServiceServer::new(
        &config.upstream.name,
        router(&config.upstream, handle),
        &config.timeouts,
    )
}

async fn health(State(state): State<UpstreamState>) -> Response {
    health_response(&state.name)
}

async fn data(State(state): State<UpstreamState>, params: RequestParams) -> Response {
    if params.fail() {
        tracing::warn!(service = %state.name, "{} -> 500 (simulated)", state.data_path);
        return json_response(StatusCode::INTERNAL_SERVER_ERROR, SIMULATED_FAILURE_BODY);
    }

    json_response(StatusCode::OK, success_body(&state, &params).to_string())
}

fn success_body(state: &UpstreamState, params: &RequestParams) -> serde_json::Value {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    match state.profile {
        UpstreamProfile::Echo => json!({
            "echo": params.msg(),
            "timestamp": timestamp,
        }),
        UpstreamProfile::Data => json!({
            "message": format!("Hello from {}", state.name),
            "timestamp": timestamp,
        }),
    }
}

async fn shutdown_route(State(state): State<UpstreamState>) -> Response {
    if state.shutdown.schedule() {
        tracing::warn!(service = %state.name, "Received shutdown request; stopping server");
    }
    shutdown_response(&state.name)
}
