use std::time::Duration;

use cloner_engine::{ClientError, ClientSettings, HttpJobService, JobService, JobStatus};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> HttpJobService {
    HttpJobService::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
    .expect("client builds")
}

#[tokio::test]
async fn submit_returns_a_pending_handle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/clone"))
        .and(body_json(json!({ "url": "https://example.com/" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "abc123",
            "status": "pending",
            "message": "Cloning started for https://example.com/",
        })))
        .mount(&server)
        .await;

    let handle = service_for(&server)
        .submit("https://example.com/")
        .await
        .expect("submit ok");

    assert_eq!(handle.job_id, "abc123");
    assert_eq!(handle.initial_status, JobStatus::Pending);
    assert_eq!(handle.message, "Cloning started for https://example.com/");
}

#[tokio::test]
async fn submit_surfaces_the_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/clone"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "detail": "rate limited" })),
        )
        .mount(&server)
        .await;

    let err = service_for(&server)
        .submit("https://example.com/")
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::Service("rate limited".to_string()));
}

#[tokio::test]
async fn submit_without_detail_falls_back_to_the_status_line() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/clone"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .submit("https://example.com/")
        .await
        .unwrap_err();
    match err {
        ClientError::Service(message) => assert!(message.contains("503"), "got {message}"),
        other => panic!("expected Service error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_status_parses_a_processing_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clone/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "abc123",
            "status": "processing",
            "original_url": "https://example.com/",
        })))
        .mount(&server)
        .await;

    let snapshot = service_for(&server)
        .fetch_status("abc123")
        .await
        .expect("fetch ok");

    assert_eq!(snapshot.job_id, "abc123");
    assert_eq!(snapshot.status, JobStatus::Processing);
    assert_eq!(snapshot.original_url, "https://example.com/");
    assert_eq!(snapshot.result_payload, None);
    assert_eq!(snapshot.error_detail, None);
}

#[tokio::test]
async fn completed_snapshot_keeps_the_payload_and_drops_stray_error_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clone/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "abc123",
            "status": "completed",
            "original_url": "https://example.com/",
            "cloned_html": "<html>cloned</html>",
            "error_message": "leftover from an earlier attempt",
        })))
        .mount(&server)
        .await;

    let snapshot = service_for(&server)
        .fetch_status("abc123")
        .await
        .expect("fetch ok");

    assert_eq!(snapshot.status, JobStatus::Completed);
    assert_eq!(
        snapshot.result_payload.as_deref(),
        Some("<html>cloned</html>")
    );
    assert_eq!(snapshot.error_detail, None);
}

#[tokio::test]
async fn failed_job_is_a_snapshot_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clone/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "abc123",
            "status": "failed",
            "original_url": "https://example.com/",
            "error_message": "Scraping failed: boom",
        })))
        .mount(&server)
        .await;

    let snapshot = service_for(&server)
        .fetch_status("abc123")
        .await
        .expect("a failed job is still a successful observation");

    assert_eq!(snapshot.status, JobStatus::Failed);
    assert_eq!(snapshot.result_payload, None);
    assert_eq!(snapshot.error_detail.as_deref(), Some("Scraping failed: boom"));
}

#[tokio::test]
async fn unknown_job_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clone/ghost"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Job not found" })),
        )
        .mount(&server)
        .await;

    let err = service_for(&server).fetch_status("ghost").await.unwrap_err();
    assert_eq!(err, ClientError::NotFound);
}

#[tokio::test]
async fn slow_responses_map_to_a_transport_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clone/abc123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({
                    "job_id": "abc123",
                    "status": "pending",
                    "original_url": "https://example.com/",
                })),
        )
        .mount(&server)
        .await;

    let service = HttpJobService::new(ClientSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    })
    .expect("client builds");

    let err = service.fetch_status("abc123").await.unwrap_err();
    match err {
        ClientError::Transport(message) => {
            assert!(message.contains("timed out"), "got {message}")
        }
        other => panic!("expected Transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn health_reflects_service_liveness() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clone/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
        .mount(&server)
        .await;
    assert!(service_for(&server).health().await);

    let sick = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clone/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&sick)
        .await;
    assert!(!service_for(&sick).health().await);
}
