// HttpProber against a local responder

use std::time::Duration;

use m3uc::core::outcome::Classification;
use m3uc::core::playlist::Entry;
use m3uc::core::probe::{HttpProber, ProbeOptions, Prober};
use tokio::net::TcpListener;

use super::support::{response, spawn_server, stream_routes};

fn entry(url: String) -> Entry {
    Entry {
        index: 1,
        line_number: 2,
        extinf_line_number: Some(1),
        display_name: "Local".to_string(),
        url,
        extinf_line: Some("#EXTINF:-1,Local".to_string()),
        group: None,
        tvg_name: None,
    }
}

fn prober(timeout: Duration) -> HttpProber {
    HttpProber::new(&ProbeOptions {
        timeout,
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_reachable_stream_is_working() {
    let addr = spawn_server(Duration::ZERO, stream_routes).await;
    let outcome = prober(Duration::from_secs(5))
        .probe(&entry(format!("http://{}/live/channel.m3u8", addr)))
        .await;

    assert_eq!(outcome.classification, Classification::Working);
    assert_eq!(outcome.http_status, Some(200));
}

#[tokio::test]
async fn test_not_found_is_failed_with_status() {
    let addr = spawn_server(Duration::ZERO, stream_routes).await;
    let outcome = prober(Duration::from_secs(5))
        .probe(&entry(format!("http://{}/gone.ts", addr)))
        .await;

    assert_eq!(outcome.classification, Classification::Failed);
    assert_eq!(outcome.error_detail, "HTTP 404");
    assert_eq!(outcome.http_status, Some(404));
}

#[tokio::test]
async fn test_rejected_head_falls_back_to_get() {
    let addr = spawn_server(Duration::ZERO, stream_routes).await;
    let outcome = prober(Duration::from_secs(5))
        .probe(&entry(format!("http://{}/head-only-broken/stream", addr)))
        .await;

    assert_eq!(outcome.classification, Classification::Working);
    assert_eq!(outcome.http_status, Some(200));
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let addr = spawn_server(Duration::ZERO, stream_routes).await;
    let outcome = prober(Duration::from_secs(5))
        .probe(&entry(format!("http://{}/moved", addr)))
        .await;

    assert_eq!(outcome.classification, Classification::Working);
    assert_eq!(outcome.http_status, Some(200));
}

#[tokio::test]
async fn test_redirect_loop_fails() {
    fn loop_forever(_method: &str, _path: &str) -> String {
        response(302, "Found", "Location: /again\r\n")
    }

    let addr = spawn_server(Duration::ZERO, loop_forever).await;
    let outcome = prober(Duration::from_secs(5))
        .probe(&entry(format!("http://{}/start", addr)))
        .await;

    assert_eq!(outcome.classification, Classification::Failed);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let addr = spawn_server(Duration::from_secs(3), stream_routes).await;
    let started = std::time::Instant::now();
    let outcome = prober(Duration::from_millis(300))
        .probe(&entry(format!("http://{}/live/slow", addr)))
        .await;

    assert_eq!(outcome.classification, Classification::Failed);
    assert_eq!(outcome.error_detail, "Timeout");
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_closed_port_is_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let outcome = prober(Duration::from_secs(5))
        .probe(&entry(format!("http://{}/live", addr)))
        .await;

    assert_eq!(outcome.classification, Classification::Failed);
    assert_eq!(outcome.error_detail, "Connection refused");
    assert_eq!(outcome.http_status, None);
}
