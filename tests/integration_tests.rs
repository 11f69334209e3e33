//! End-to-end pipeline tests against a mocked Optical backend

use chrono::Local;
use optical_export::pipeline::build_filename;
use optical_export::{ExportConfig, ExportPipeline};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pipeline_for(server: &MockServer) -> ExportPipeline {
    let config = ExportConfig::new(server.uri(), "test-token");
    ExportPipeline::new(config).unwrap()
}

async fn mock_deals(server: &MockServer, deals: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/items/deals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": deals })))
        .mount(server)
        .await;
}

async fn mock_folder_found(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/folders"))
        .and(query_param("filter[name][_eq]", "Reports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "folder-1"}]})))
        .mount(server)
        .await;
}

async fn mock_no_existing_file(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_export_happy_path_creates_file() {
    let server = MockServer::start().await;

    mock_deals(
        &server,
        json!([
            {"name": "Acme Deal", "product": {"name": "Widget"}, "value": 1000},
            {"name": "Beta Deal", "owner": {"email": "owner@example.com"}}
        ]),
    )
    .await;
    mock_folder_found(&server).await;
    mock_no_existing_file(&server).await;

    // The multipart upload carries the CSV header, the data rows, and the
    // resolved folder id
    Mock::given(method("POST"))
        .and(path("/files"))
        .and(body_string_contains("metrics_product_name"))
        .and(body_string_contains("Acme Deal"))
        .and(body_string_contains("owner@example.com"))
        .and(body_string_contains("folder-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "f-1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let before = build_filename("deals", Local::now());
    let summary = pipeline_for(&server).run().await.unwrap();
    let after = build_filename("deals", Local::now());

    assert_eq!(summary.record_count, 2);
    assert!(summary.file_uploaded == before || summary.file_uploaded == after);
    assert!(summary.file_uploaded.starts_with("deals-"));
    assert!(summary.file_uploaded.ends_with("h.csv"));
}

#[tokio::test]
async fn test_export_replaces_existing_file() {
    let server = MockServer::start().await;

    mock_deals(&server, json!([{"name": "Only Deal"}])).await;
    mock_folder_found(&server).await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "file-7"}]})))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/files/file-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "file-7"}})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let summary = pipeline_for(&server).run().await.unwrap();
    assert_eq!(summary.record_count, 1);
}

#[tokio::test]
async fn test_export_zero_records_uploads_header_only() {
    let server = MockServer::start().await;

    mock_deals(&server, json!([])).await;
    mock_folder_found(&server).await;
    mock_no_existing_file(&server).await;

    Mock::given(method("POST"))
        .and(path("/files"))
        .and(body_string_contains("name,stage,product_name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "f-1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let summary = pipeline_for(&server).run().await.unwrap();
    assert_eq!(summary.record_count, 0);
}

#[tokio::test]
async fn test_fetch_failure_aborts_before_publish() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/deals"))
        .respond_with(
            ResponseTemplate::new(503).set_body_string(r#"{"errors":[{"message":"maintenance"}]}"#),
        )
        .mount(&server)
        .await;

    // Publisher must never be reached
    Mock::given(method("GET"))
        .and(path("/folders"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = pipeline_for(&server).run().await.unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Error fetching deals:"));
    assert!(message.contains("maintenance"));
}

#[tokio::test]
async fn test_publish_failure_is_total_failure() {
    let server = MockServer::start().await;

    // Fetch succeeds, upload fails: the run reports the upload error and
    // no partial success
    mock_deals(&server, json!([{"name": "Doomed Deal"}])).await;
    mock_folder_found(&server).await;
    mock_no_existing_file(&server).await;

    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(507).set_body_string("insufficient storage"))
        .mount(&server)
        .await;

    let err = pipeline_for(&server).run().await.unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Error uploading file:"));
    assert!(message.contains("insufficient storage"));
}

#[tokio::test]
async fn test_export_creates_folder_when_absent() {
    let server = MockServer::start().await;

    mock_deals(&server, json!([{"name": "Deal"}])).await;

    Mock::given(method("GET"))
        .and(path("/folders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/folders"))
        .and(body_string_contains("Reports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "fresh-1"}})))
        .expect(1)
        .mount(&server)
        .await;

    mock_no_existing_file(&server).await;

    Mock::given(method("POST"))
        .and(path("/files"))
        .and(body_string_contains("fresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "f-1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let summary = pipeline_for(&server).run().await.unwrap();
    assert_eq!(summary.record_count, 1);
}

#[tokio::test]
async fn test_notes_are_sanitized_in_upload() {
    let server = MockServer::start().await;

    mock_deals(
        &server,
        json!([{"name": "Deal", "notes": "<b>Call</b> &amp; confirm"}]),
    )
    .await;
    mock_folder_found(&server).await;
    mock_no_existing_file(&server).await;

    Mock::given(method("POST"))
        .and(path("/files"))
        .and(body_string_contains("Call & confirm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "f-1"}})))
        .expect(1)
        .mount(&server)
        .await;

    pipeline_for(&server).run().await.unwrap();
}
