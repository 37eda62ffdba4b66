//! Prober classification against live mock targets.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use egress_probe::config::ProberConfig;
use egress_probe::health::{Prober, StatusStore};

mod common;

fn prober_for(target: String) -> Prober {
    let config = ProberConfig {
        interval: Duration::from_secs(24 * 60 * 60),
        target_url: target,
        timeout: Some(Duration::from_secs(5)),
        ..ProberConfig::default()
    };
    Prober::new(StatusStore::default(), config)
}

#[tokio::test]
async fn test_ok_target_is_all_normal() {
    let addr = common::start_mock_target(200).await;
    let prober = prober_for(format!("http://{}/", addr));

    let status = prober.probe_once().await;
    assert!(status.ok);
    assert_eq!(status.message, "all normal");
    assert_eq!(*prober.store().snapshot(), *status);
}

#[tokio::test]
async fn test_non_200_target_is_unhealthy() {
    let addr = common::start_mock_target(503).await;
    let prober = prober_for(format!("http://{}/", addr));

    let status = prober.probe_once().await;
    assert!(!status.ok);
    assert_eq!(status.message, "cannot reach target normally");
}

#[tokio::test]
async fn test_redirect_to_ok_target_is_all_normal() {
    let final_addr = common::start_mock_target(200).await;
    let addr = common::start_redirecting_target(format!("http://{}/", final_addr)).await;
    let prober = prober_for(format!("http://{}/", addr));

    let status = prober.probe_once().await;
    assert!(status.ok);
    assert_eq!(status.message, "all normal");
}

#[tokio::test]
async fn test_redirect_to_failing_target_is_unhealthy() {
    let final_addr = common::start_mock_target(503).await;
    let addr = common::start_redirecting_target(format!("http://{}/portal", final_addr)).await;
    let prober = prober_for(format!("http://{}/", addr));

    let status = prober.probe_once().await;
    assert!(!status.ok);
    assert_eq!(status.message, "cannot reach target normally");
}

#[tokio::test]
async fn test_redirect_loop_gives_up() {
    let addr = common::start_redirecting_target("/again".to_string()).await;
    let prober = prober_for(format!("http://{}/", addr));

    let status = prober.probe_once().await;
    assert!(!status.ok);
    assert_eq!(status.message, "access failed: stopped after 10 redirects");
}

#[tokio::test]
async fn test_truncated_connection_is_filtered() {
    let addr = common::start_truncating_target().await;
    let prober = prober_for(format!("http://{}/", addr));

    let status = prober.probe_once().await;
    assert!(!status.ok);
    assert_eq!(status.message, "blocked by network filtering");
}

#[tokio::test]
async fn test_refused_connection_reports_error_text() {
    let addr = common::unused_addr().await;
    let prober = prober_for(format!("http://{}/", addr));

    let status = prober.probe_once().await;
    assert!(!status.ok);
    assert!(
        status.message.starts_with("access failed: "),
        "unexpected message: {}",
        status.message
    );
    assert!(status.message.len() > "access failed: ".len());
}

#[tokio::test]
async fn test_status_follows_target_and_timestamps_advance() {
    let healthy = Arc::new(AtomicU32::new(0));
    let h = healthy.clone();
    let addr = common::start_programmable_target(move || {
        let h = h.clone();
        async move {
            if h.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
                (200, "up".into())
            } else {
                (500, "down".into())
            }
        }
    })
    .await;
    let prober = prober_for(format!("http://{}/", addr));

    let first = prober.probe_once().await;
    let second = prober.probe_once().await;
    let third = prober.probe_once().await;

    assert!(first.ok);
    assert!(!second.ok);
    assert!(third.ok);
    assert!(second.last_update >= first.last_update);
    assert!(third.last_update >= second.last_update);
}
