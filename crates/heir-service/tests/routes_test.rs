//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::io::Write;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use heir_core::VacantSidePolicy;
use heir_service::schema::load_document;
use heir_service::{router, AppState, ServiceConfig, TreeDocument};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(vacant_side: VacantSidePolicy) -> axum::Router {
    router(AppState::new(ServiceConfig {
        vacant_side,
        ..ServiceConfig::default()
    }))
}

async fn post(app: axum::Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn spouse_and_children() -> Value {
    json!({
        "estate_value": 1000000,
        "family_tree": {
            "person": { "id": "d1", "name": "Decedent", "is_alive": false },
            "spouse": { "id": "s1", "name": "Spouse" },
            "children": [
                { "person": { "id": "c1", "name": "Child 1" } },
                { "person": { "id": "c2", "name": "Child 2" } }
            ]
        }
    })
}

// ---------------------------------------------------------------------------
// /health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ok() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app(VacantSidePolicy::default()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

// ---------------------------------------------------------------------------
// /calculate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn first_degree_response() {
    let (status, body) = post(
        app(VacantSidePolicy::default()),
        "/calculate",
        spouse_and_children().to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["degree"], "first");
    assert_eq!(body["estate_value"], 1000000.0);
    assert_eq!(body["total_distributed"], 1000000.0);
    assert_eq!(body["undistributed"], 0.0);
    assert_eq!(body["summary"]["s1"]["share"], 250000.0);
    assert_eq!(body["summary"]["s1"]["relation"], "spouse");
    assert_eq!(body["summary"]["c1"]["share"], 375000.0);
    assert_eq!(body["summary"]["c2"]["share_percentage"], 37.5);
    assert!(body["summary"].get("d1").is_none());
    assert_eq!(body["family_tree"]["children"][0]["person"]["share"], 375000.0);
}

#[tokio::test]
async fn legacy_route_is_mounted() {
    let (status, body) = post(
        app(VacantSidePolicy::default()),
        "/calculate-inheritance",
        spouse_and_children().to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["degree"], "first");
}

#[tokio::test]
async fn retain_policy_reports_undistributed() {
    // Mother alive, father side absent: under `retain` half the
    // non-spouse portion stays unassigned.
    let request = json!({
        "estate_value": 1000,
        "family_tree": {
            "person": { "id": "d1", "name": "D", "is_alive": false },
            "parents": { "mother": { "person": { "id": "m1", "name": "M" } } }
        }
    });

    let (_, accrued) = post(
        app(VacantSidePolicy::AccrueToOtherSide),
        "/calculate",
        request.to_string(),
    )
    .await;
    assert_eq!(accrued["summary"]["m1"]["share"], 1000.0);
    assert_eq!(accrued["undistributed"], 0.0);

    let (_, retained) = post(
        app(VacantSidePolicy::LeaveUndistributed),
        "/calculate",
        request.to_string(),
    )
    .await;
    assert_eq!(retained["summary"]["m1"]["share"], 500.0);
    assert_eq!(retained["undistributed"], 500.0);
}

#[tokio::test]
async fn unknown_parent_type_is_bad_request() {
    let request = json!({
        "estate_value": 1000,
        "family_tree": {
            "person": { "id": "d1", "name": "D", "is_alive": false },
            "parents": { "stepmother": { "person": { "id": "m1", "name": "M" } } }
        }
    });
    let (status, body) = post(
        app(VacantSidePolicy::default()),
        "/calculate",
        request.to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("stepmother"));
}

#[tokio::test]
async fn non_positive_estate_is_bad_request() {
    let mut request = spouse_and_children();
    request["estate_value"] = json!(0);
    let (status, body) = post(
        app(VacantSidePolicy::default()),
        "/calculate",
        request.to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("positive"));
}

#[tokio::test]
async fn duplicate_ids_are_bad_request() {
    let request = json!({
        "estate_value": 1000,
        "family_tree": {
            "person": { "id": "d1", "name": "D", "is_alive": false },
            "children": [
                { "person": { "id": "c1", "name": "A" } },
                { "person": { "id": "c1", "name": "B" } }
            ]
        }
    });
    let (status, body) = post(
        app(VacantSidePolicy::default()),
        "/calculate",
        request.to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate person id: c1");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (status, body) = post(
        app(VacantSidePolicy::default()),
        "/calculate",
        "{\"estate_value\": 10".to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid request body"));
}

// ---------------------------------------------------------------------------
// Documents on disk
// ---------------------------------------------------------------------------

#[test]
fn load_document_reads_request_files() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", spouse_and_children()).unwrap();
    let doc = load_document(file.path()).unwrap();
    assert!(matches!(doc, TreeDocument::Request(_)));
    assert_eq!(doc.estate_value(), Some(1000000.0));
}

#[test]
fn load_document_reports_path_on_parse_failure() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    let err = load_document(file.path()).unwrap_err();
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn load_document_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_document(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().starts_with("failed to read"));
}
