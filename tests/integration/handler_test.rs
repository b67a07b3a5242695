use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use expected_counts::server::{AppState, health, mock_api};
use expected_counts::{TableKind, handle_event};
use serde_json::{Value, json};

use crate::utils::seeded_loader;

const STUDY: &str = "LYM01";

fn tables() -> Vec<(TableKind, &'static str)> {
    vec![
        (TableKind::Case, "participant_id\tbreed\nL1\tBoxer\nL2\tBeagle\n"),
        (TableKind::Sample, "participant_id\tsample_id\nL1\tS1\nL2\tS2\n"),
        (TableKind::File, "file_name\tsample_id\na.bam\tS1\nb.bam\tS2\nprotocol.pdf\t\n"),
    ]
}

fn body(response_body: &str) -> Value {
    serde_json::from_str(response_body).unwrap()
}

#[tokio::test]
async fn test_handle_event_with_string_body() {
    let loader = seeded_loader(STUDY, &tables()).await;
    let event = json!({
        "body": json!({"study": STUDY, "filters": {"Breed": ["Boxer"]}}).to_string(),
    });

    let response = handle_event(&loader, &event).await;
    assert!(response.is_success());
    assert_eq!(response.headers["Content-Type"], "application/json");

    let body = body(&response.body);
    assert_eq!(body["study"], STUDY);
    assert_eq!(body["filters"], json!({"Breed": ["Boxer"]}));
    assert_eq!(body["expected"]["count"], 1);
    assert_eq!(body["expected"]["ids"], json!(["L1"]));
    assert_eq!(
        body["expected"]["stats"],
        json!({"participants": 1, "samples": 1, "files": 1, "caseFiles": 1, "studyFiles": 1})
    );
    assert_eq!(
        body["expected"]["statBar"],
        json!({"participants": 1, "samples": 1, "studies": 1})
    );
    assert_eq!(body["meta"]["source"], "tsv");
    assert!(body["meta"]["timestamp"].is_string());
}

#[tokio::test]
async fn test_handle_raw_event() {
    let loader = seeded_loader(STUDY, &tables()).await;
    let response = handle_event(&loader, &json!({"study": STUDY})).await;
    assert!(response.is_success());
    assert_eq!(body(&response.body)["expected"]["count"], 2);
}

#[tokio::test]
async fn test_missing_study_is_json_failure() {
    let loader = seeded_loader(STUDY, &tables()).await;
    let response = handle_event(&loader, &json!({"body": "{\"filters\": {}}"})).await;
    assert_eq!(response.status_code, 500);
    assert_eq!(body(&response.body), json!({"error": "missing required field: study"}));
}

#[tokio::test]
async fn test_bad_filter_value_is_json_failure() {
    let loader = seeded_loader(STUDY, &tables()).await;
    let event = json!({"body": {"study": STUDY, "filters": {"Sex": null}}});
    let response = handle_event(&loader, &event).await;
    assert_eq!(response.status_code, 500);
    assert!(body(&response.body)["error"].as_str().unwrap().contains("Sex"));
}

#[tokio::test]
async fn test_mock_api_route() {
    let loader = seeded_loader(STUDY, &tables()).await;
    let state = AppState::new(loader);

    let request = Bytes::from(json!({"study": STUDY, "filters": {"Breed": ["Beagle"]}}).to_string());
    let (status, response) = mock_api(State(state.clone()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response.0["expected"]["ids"], json!(["L2"]));

    let (status, response) = mock_api(State(state.clone()), Bytes::from_static(b"{oops")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.0["error"].is_string());

    let (status, response) = mock_api(State(state), Bytes::from_static(b"null")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.0["error"].is_string());
}

#[tokio::test]
async fn test_health_route() {
    assert_eq!(health().await.0, json!({"status": "ok"}));
}
