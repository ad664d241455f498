//! Failure injection tests for the relay fallback path.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use service_relay::config::{Flavor, RelayProfile, UpstreamProfile};

mod common;

async fn fallback(res: reqwest::Response) -> (StatusCode, Value) {
    let status = res.status();
    let content_type = res.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("application/json"), "got {}", content_type);
    let body: Value = serde_json::from_str(&res.text().await.unwrap()).expect("well-formed JSON");
    assert_eq!(body["message"], "Service A unavailable");
    let reason = body["reason"].as_str().expect("reason is a string");
    assert!(!reason.contains('"'));
    (status, body)
}

#[tokio::test]
async fn test_upstream_down_strict() {
    let upstream = common::unused_addr().await;
    let relay = common::spawn_relay(common::relay_config(
        upstream,
        RelayProfile::CallEcho,
        Flavor::Strict,
    ))
    .await;

    let res = common::client()
        .get(relay.url("/call-echo?msg=hello"))
        .send()
        .await
        .expect("relay unreachable");

    let (status, body) = fallback(res).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(!body["reason"].as_str().unwrap().is_empty());

    relay.shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_down_lenient() {
    let upstream = common::unused_addr().await;
    let relay = common::spawn_relay(common::relay_config(
        upstream,
        RelayProfile::CallEcho,
        Flavor::Lenient,
    ))
    .await;

    let res = common::client()
        .get(relay.url("/call-echo?msg=hello"))
        .send()
        .await
        .expect("relay unreachable");

    let (status, _) = fallback(res).await;
    assert_eq!(status, StatusCode::OK);

    relay.shutdown.trigger();
}

#[tokio::test]
async fn test_fail_flag_reaches_upstream() {
    let upstream = common::spawn_upstream(common::upstream_config(UpstreamProfile::Echo)).await;

    for (flavor, expected) in [
        (Flavor::Strict, StatusCode::SERVICE_UNAVAILABLE),
        (Flavor::Lenient, StatusCode::OK),
    ] {
        let relay = common::spawn_relay(common::relay_config(
            upstream.addr,
            RelayProfile::CallEcho,
            flavor,
        ))
        .await;

        let res = common::client()
            .get(relay.url("/call-echo?msg=hi&fail=true"))
            .send()
            .await
            .unwrap();

        let (status, body) = fallback(res).await;
        assert_eq!(status, expected);
        assert_eq!(body["reason"], "upstream returned status 500");
        assert!(body.get("echo").is_none());

        relay.shutdown.trigger();
    }

    upstream.shutdown.trigger();
}

#[tokio::test]
async fn test_non_200_upstream_reason() {
    let backend = common::start_programmable_backend(|| async {
        (502, r#"{"error":"bad gateway"}"#.to_string())
    })
    .await;
    let relay = common::spawn_relay(common::relay_config(
        backend,
        RelayProfile::CallEcho,
        Flavor::Strict,
    ))
    .await;

    let res = common::client()
        .get(relay.url("/call-echo?msg=x"))
        .send()
        .await
        .unwrap();

    let (status, body) = fallback(res).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["reason"], "upstream returned status 502");

    relay.shutdown.trigger();
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let backend = common::start_programmable_backend(|| async {
        tokio::time::sleep(Duration::from_secs(2)).await;
        (200, r#"{"echo":"late"}"#.to_string())
    })
    .await;
    let mut config = common::relay_config(backend, RelayProfile::CallEcho, Flavor::Strict);
    config.relay.timeout_ms = 200;
    let relay = common::spawn_relay(config).await;

    let res = common::client()
        .get(relay.url("/call-echo?msg=x"))
        .send()
        .await
        .unwrap();

    let (status, body) = fallback(res).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(!body["reason"].as_str().unwrap().is_empty());

    relay.shutdown.trigger();
}

#[tokio::test]
async fn test_relay_health_without_upstream() {
    let upstream = common::unused_addr().await;
    let relay = common::spawn_relay(common::relay_config(
        upstream,
        RelayProfile::Fetch,
        Flavor::Lenient,
    ))
    .await;

    let res = common::client().get(relay.url("/status")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Service B healthy");

    relay.shutdown.trigger();
}
