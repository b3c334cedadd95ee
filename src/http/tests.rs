use std::sync::{Arc, Mutex, PoisonError};

use axum::body::{to_bytes, Body};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, CONTENT_TYPE, ORIGIN,
};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use super::*;
use crate::store::RecordStore;

fn make_router() -> (Router, Arc<RecordStore>) {
    let store = Arc::new(RecordStore::new());
    (build_router(HttpState::new(Arc::clone(&store))), store)
}

async fn response_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    let json = serde_json::from_slice::<Value>(&bytes).expect("JSON body");
    (status, json)
}

fn post(body: &'static str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/audio")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("ingest request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("get request")
}

#[tokio::test]
async fn ingest_returns_empty_ok() {
    let (router, store) = make_router();
    let response = router
        .oneshot(post(
            r#"{"f0":1.0,"rms":2.0,"centroid":3.0,"startedAt":"t1","endedAt":"t1","localTime":10,"bpm":"90"}"#,
        ))
        .await
        .expect("ingest call");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("ingest body");
    assert!(bytes.is_empty());
    assert_eq!(store.len(), 1);
    assert_eq!(store.list_all()[0].bpm, "90");
}

#[tokio::test]
async fn malformed_ingest_still_appends_default_record() {
    let (router, store) = make_router();
    let response = router
        .oneshot(post("this is not json"))
        .await
        .expect("ingest call");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.list_all(), vec![crate::store::FeatureRecord::default()]);
}

#[tokio::test]
async fn list_starts_as_empty_array() {
    let (router, _) = make_router();
    let (status, json) = response_json(router.oneshot(get("/api/audio")).await.expect("list call")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn chart_route_projects_store() {
    let (router, _) = make_router();
    router
        .clone()
        .oneshot(post(r#"{"f0":1.0,"rms":2.0,"centroid":3.0,"startedAt":"t1"}"#))
        .await
        .expect("ingest call");

    let (status, json) = response_json(
        router
            .oneshot(get("/api/audio/chart"))
            .await
            .expect("chart call"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["labels"], serde_json::json!(["t1"]));
    assert_eq!(json["datasets"][0]["data"], serde_json::json!([1.0]));
    assert_eq!(json["datasets"][1]["data"], serde_json::json!([2.0]));
    assert_eq!(json["datasets"][2]["data"], serde_json::json!([3.0]));
}

#[tokio::test]
async fn preflight_is_answered_without_touching_store() {
    let (router, store) = make_router();
    let response = router
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/audio")
                .header(ORIGIN, "http://localhost:3000")
                .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .expect("preflight request"),
        )
        .await
        .expect("preflight call");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let headers = response.headers();
    assert_eq!(headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    assert!(headers
        .get(ACCESS_CONTROL_ALLOW_METHODS)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .contains("POST"));
    assert_eq!(
        headers.get(ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
        "content-type"
    );
    assert!(store.is_empty());
}

#[tokio::test]
async fn every_route_allows_any_origin() {
    let (router, _) = make_router();
    let requests = vec![
        Request::builder()
            .method(Method::POST)
            .uri("/api/audio")
            .header(ORIGIN, "http://localhost:3000")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"f0":1.0}"#))
            .expect("ingest request"),
        Request::builder()
            .uri("/api/audio")
            .header(ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .expect("list request"),
        Request::builder()
            .uri("/api/audio/chart")
            .header(ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .expect("chart request"),
    ];

    for request in requests {
        let uri = request.uri().clone();
        let method = request.method().clone();
        let response = router.clone().oneshot(request).await.expect("route call");

        assert_eq!(response.status(), StatusCode::OK, "{method} {uri}");
        assert_eq!(
            response
                .headers()
                .get(ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some("*"),
            "{method} {uri}"
        );
    }
}

struct CaptureLogger {
    records: Mutex<Vec<(log::Level, String)>>,
}

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

#[tokio::test]
async fn ingested_record_is_logged_at_info() {
    let _ = log::set_logger(&CAPTURE);
    log::set_max_level(log::LevelFilter::Trace);

    let (router, _) = make_router();
    let response = router
        .oneshot(post(r#"{"f0":4.0,"bpm":"ingest-log-marker"}"#))
        .await
        .expect("ingest call");
    assert_eq!(response.status(), StatusCode::OK);

    let records = CAPTURE
        .records
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    assert!(records.iter().any(|(level, message)| {
        *level == log::Level::Info
            && message.starts_with("[Ingest]")
            && message.contains("ingest-log-marker")
    }));
}
