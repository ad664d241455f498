//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use service_relay::config::{Flavor, RelayProfile, ServiceConfig, UpstreamProfile};
use service_relay::http::{relay, upstream, ServerError};
use service_relay::Shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A service running on an ephemeral local port.
pub struct RunningService {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<Result<(), ServerError>>,
}

impl RunningService {
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }

    /// Wait for the server future to resolve.
    pub async fn stopped(self, within: Duration) -> Result<(), ServerError> {
        tokio::time::timeout(within, self.task)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked")
    }
}

pub fn upstream_config(profile: UpstreamProfile) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.upstream.profile = profile;
    config.lifecycle.shutdown_grace_ms = 100;
    config
}

pub fn relay_config(upstream: SocketAddr, profile: RelayProfile, flavor: Flavor) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.relay.profile = profile;
    config.relay.flavor = Some(flavor);
    config.relay.upstream_base_url = format!("http://{}", upstream);
    config.lifecycle.shutdown_grace_ms = 100;
    config
}

pub async fn spawn_upstream(config: ServiceConfig) -> RunningService {
    let shutdown = Shutdown::new();
    let server = upstream::server(&config, &shutdown);
    spawn(server, shutdown).await
}

pub async fn spawn_relay(config: ServiceConfig) -> RunningService {
    let shutdown = Shutdown::new();
    let server = relay::server(&config, &shutdown).expect("relay config");
    spawn(server, shutdown).await
}

async fn spawn(server: service_relay::ServiceServer, shutdown: Shutdown) -> RunningService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let rx = shutdown.subscribe();
    let task = tokio::spawn(server.run(listener, rx));
    RunningService {
        addr,
        shutdown,
        task,
    }
}

/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Test client without pooling, so each request opens a fresh connection.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Form-encode a value for a query string.
pub fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Start a programmable raw-TCP backend answering every request with `f()`.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = std::sync::Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
