//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wrap a service's routes with the shared middleware stack
//! - Write one access record per request (service, route, status, latency)
//! - Turn handler panics into a 500 so no request goes unanswered
//! - Serve until the shutdown signal, draining in-flight responses

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::TimeoutConfig;
use crate::observability::record_request;

/// Error type for serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// An HTTP server for one service role.
pub struct ServiceServer {
    name: Arc<str>,
    router: Router,
}

impl ServiceServer {
    /// Wrap `routes` with the shared middleware stack.
    #[allow(deprecated)]
    pub fn new(name: &str, routes: Router, timeouts: &TimeoutConfig) -> Self {
        let name: Arc<str> = Arc::from(name);
        let router = routes
            .layer(CatchPanicLayer::new())
            .layer(TimeoutLayer::new(Duration::from_secs(timeouts.request_secs)))
            .layer(middleware::from_fn_with_state(name.clone(), access_log))
            .layer(TraceLayer::new_for_http());

        Self { name, router }
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Bind a listener for `addr`.
    pub async fn bind(addr: &str) -> Result<TcpListener, ServerError> {
        TcpListener::bind(addr).await.map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            service = %self.name,
            address = %addr,
            "{} starting on {}",
            self.name,
            addr
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::warn!(service = %self.name, "{} stopped", self.name);
        Ok(())
    }
}

/// Access log middleware: one record per handled request.
async fn access_log(State(service): State<Arc<str>>, request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let route = request.uri().path().to_string();

    let response = next.run(request).await;

    record_request(&service, &route, response.status().as_u16(), start);
    response
}
