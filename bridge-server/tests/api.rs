//! HTTP surface tests
//!
//! Drives the fully built router with in-process requests: no TLS, no
//! sockets, no real printers - the directory and the stream device are
//! test doubles.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use bridge_printer::{PrintError, PrintResult, Printer, PrinterDirectory, PrinterInfo};
use bridge_server::core::{Config, DeviceChannel, ServerState};
use bridge_server::store::ConfigStore;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

struct FakeDirectory {
    printers: Vec<PrinterInfo>,
}

impl FakeDirectory {
    fn new(names: &[&str], default: Option<&str>) -> Self {
        Self {
            printers: names
                .iter()
                .map(|n| PrinterInfo {
                    name: n.to_string(),
                    is_default: Some(*n) == default,
                })
                .collect(),
        }
    }
}

impl PrinterDirectory for FakeDirectory {
    fn list(&self) -> PrintResult<Vec<PrinterInfo>> {
        Ok(self.printers.clone())
    }

    fn default_printer(&self) -> PrintResult<String> {
        self.printers
            .iter()
            .find(|p| p.is_default)
            .map(|p| p.name.clone())
            .ok_or(PrintError::NoDefaultPrinter)
    }
}

struct RecordingPrinter {
    written: Arc<Mutex<Vec<u8>>>,
}

#[async_trait]
impl Printer for RecordingPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        self.written.lock().unwrap().extend_from_slice(data);
        Ok(())
    }

    async fn is_online(&self) -> bool {
        true
    }
}

struct TestApp {
    app: Router,
    _work_dir: tempfile::TempDir,
    written: Arc<Mutex<Vec<u8>>>,
}

fn stream_app(names: &[&str], default: Option<&str>) -> TestApp {
    let work_dir = tempfile::tempdir().unwrap();
    let written = Arc::new(Mutex::new(Vec::new()));

    let mut config = Config::from_env();
    config.work_dir = work_dir.path().to_path_buf();

    let state = ServerState::with_parts(
        config,
        ConfigStore::new(work_dir.path().join("printer-config.json")),
        Arc::new(FakeDirectory::new(names, default)),
        DeviceChannel::Stream {
            label: "COM4".to_string(),
            printer: Arc::new(RecordingPrinter {
                written: written.clone(),
            }),
            fold_ascii: true,
        },
    );

    TestApp {
        app: bridge_server::api::build_app(state),
        _work_dir: work_dir,
        written,
    }
}

fn spooler_app(names: &[&str], default: Option<&str>) -> TestApp {
    let work_dir = tempfile::tempdir().unwrap();

    let mut config = Config::from_env();
    config.work_dir = work_dir.path().to_path_buf();

    let state = ServerState::with_parts(
        config,
        ConfigStore::new(work_dir.path().join("printer-config.json")),
        Arc::new(FakeDirectory::new(names, default)),
        DeviceChannel::Spooler,
    );

    TestApp {
        app: bridge_server::api::build_app(state),
        _work_dir: work_dir,
        written: Arc::new(Mutex::new(Vec::new())),
    }
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

fn post_json(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_mode() {
    let t = stream_app(&[], None);

    let response = t.app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["mode"], "stream");
    assert_eq!(body["device"], "COM4");
}

#[tokio::test]
async fn printers_listing_includes_default() {
    let t = spooler_app(&["Alpha", "Beta"], Some("Beta"));

    let response = t.app.oneshot(get("/api/printers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["printers"], serde_json::json!(["Alpha", "Beta"]));
    assert_eq!(body["default"], "Beta");
}

#[tokio::test]
async fn selection_round_trip() {
    let t = spooler_app(&["Alpha", "Beta"], Some("Alpha"));

    // Nothing pinned yet
    let response = t.app.clone().oneshot(get("/api/selected-printer")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["selectedPrinter"], serde_json::Value::Null);

    // Pin Beta
    let response = t
        .app
        .clone()
        .oneshot(post_json(
            "/api/selected-printer",
            r#"{"printerName":"Beta"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["selectedPrinter"], "Beta");

    // Read it back
    let response = t.app.clone().oneshot(get("/api/selected-printer")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["selectedPrinter"], "Beta");

    // Clear with null
    let response = t
        .app
        .clone()
        .oneshot(post_json(
            "/api/selected-printer",
            r#"{"printerName":null}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["selectedPrinter"], serde_json::Value::Null);
}

#[tokio::test]
async fn unknown_selection_is_rejected() {
    let t = spooler_app(&["Alpha"], Some("Alpha"));

    let response = t
        .app
        .oneshot(post_json(
            "/api/selected-printer",
            r#"{"printerName":"Ghost"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn empty_selection_is_rejected() {
    let t = spooler_app(&["Alpha"], Some("Alpha"));

    let response = t
        .app
        .oneshot(post_json(
            "/api/selected-printer",
            r#"{"printerName":"  "}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn print_delivers_decoded_bytes_to_the_device() {
    let t = stream_app(&[], None);

    // "TOTAL 12.50\n"
    let response = t
        .app
        .clone()
        .oneshot(post_json("/print", r#"{"data":"VE9UQUwgMTIuNTAK"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["printer"], "COM4");
    assert_eq!(body["bytes"], 12);
    assert_eq!(body["jobId"], serde_json::Value::Null);

    assert_eq!(*t.written.lock().unwrap(), b"TOTAL 12.50\n");
}

#[tokio::test]
async fn print_accepts_data_uri_payloads() {
    let t = stream_app(&[], None);

    let response = t
        .app
        .clone()
        .oneshot(post_json(
            "/print",
            r#"{"data":"data:application/octet-stream;base64,VE9UQUwgMTIuNTAK"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(*t.written.lock().unwrap(), b"TOTAL 12.50\n");
}

#[tokio::test]
async fn print_without_data_is_bad_request() {
    let t = stream_app(&[], None);

    let response = t.app.oneshot(post_json("/print", r#"{}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"], "No data provided");
}

#[tokio::test]
async fn print_with_malformed_base64_is_bad_request() {
    let t = stream_app(&[], None);

    let response = t
        .app
        .oneshot(post_json("/print", r#"{"data":"%%%not-base64%%%"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[cfg(not(windows))]
#[tokio::test]
async fn spooler_failure_returns_generic_error_only() {
    // Resolution succeeds (fake directory), dispatch fails (no spooler on
    // this platform); the caller must see a generic message, not OS detail
    let t = spooler_app(&["Alpha"], Some("Alpha"));

    let response = t
        .app
        .oneshot(post_json("/print", r#"{"data":"VE9UQUwK"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    let message = body["error"].as_str().unwrap();
    assert_eq!(message, "Print failed. Check the printer and its driver.");
}

#[tokio::test]
async fn ui_page_is_served() {
    let t = stream_app(&[], None);

    let response = t.app.oneshot(get("/ui")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Choose a printer"));
}
