//! End-to-end: startup, status API, static files, shutdown.

use std::time::Duration;
use tokio::sync::oneshot;

use egress_probe::config::ProbeConfig;
use egress_probe::lifecycle::{self, StartupError};

mod common;

#[tokio::test]
async fn test_service_reports_probe_status() {
    let target = common::start_mock_target(200).await;
    let listen = common::unused_addr().await;
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.html"), "status page").unwrap();

    let mut config = ProbeConfig::default();
    config.listener.bind_address = listen.to_string();
    config.probe.interval = Duration::from_millis(200);
    config.probe.target_url = format!("http://{}/", target);
    config.static_files.root = static_dir.path().to_path_buf();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let service = tokio::spawn(lifecycle::run(config, async move {
        let _ = stop_rx.await;
    }));

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let status_url = format!("http://{}/api/status", listen);

    // Wait for the listener, then for the first probe to land
    let mut json = serde_json::Value::Null;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if let Ok(res) = client.get(&status_url).send().await {
            assert_eq!(res.status(), 200);
            json = res.json().await.unwrap();
            if json["msg"] == "all normal" {
                break;
            }
        }
    }

    assert_eq!(json["ok"], true);
    assert_eq!(json["msg"], "all normal");
    assert!(json["last_update"].is_string());

    let page = client
        .get(format!("http://{}/", listen))
        .send()
        .await
        .unwrap();
    assert_eq!(page.status(), 200);
    assert_eq!(page.text().await.unwrap(), "status page");

    let missing = client
        .get(format!("http://{}/missing.js", listen))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);

    stop_tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), service)
        .await
        .expect("service did not stop")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_started_status_before_first_probe() {
    let listen = common::unused_addr().await;
    let static_dir = tempfile::tempdir().unwrap();

    let mut config = ProbeConfig::default();
    config.listener.bind_address = listen.to_string();
    config.probe.interval = Duration::from_secs(3600);
    config.static_files.root = static_dir.path().to_path_buf();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let service = tokio::spawn(lifecycle::run(config, async move {
        let _ = stop_rx.await;
    }));

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let mut json = serde_json::Value::Null;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if let Ok(res) = client.get(format!("http://{}/api/status", listen)).send().await {
            json = res.json().await.unwrap();
            break;
        }
    }

    assert_eq!(json["ok"], true);
    assert_eq!(json["msg"], "probe started");

    stop_tx.send(()).unwrap();
    let _ = tokio::time::timeout(Duration::from_secs(5), service).await;
}

#[tokio::test]
async fn test_interval_of_a_year_fails_before_binding() {
    let listen = common::unused_addr().await;

    let mut config = ProbeConfig::default();
    config.listener.bind_address = listen.to_string();
    config.probe.interval = Duration::from_secs(365 * 24 * 60 * 60);

    let err = lifecycle::run(config, std::future::pending()).await.unwrap_err();
    assert!(matches!(err, StartupError::Config(_)));
    assert!(err.to_string().contains("The specified duration is too long!"));

    // Nothing was bound
    assert!(tokio::net::TcpListener::bind(listen).await.is_ok());
}

#[tokio::test]
async fn test_bind_failure_is_fatal() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();

    let mut config = ProbeConfig::default();
    config.listener.bind_address = taken.local_addr().unwrap().to_string();

    let err = lifecycle::run(config, std::future::pending()).await.unwrap_err();
    assert!(matches!(err, StartupError::Listener(_)));
    assert!(err.to_string().starts_with("Unable to listen on address"));
}
