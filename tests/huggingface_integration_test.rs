//! Wiremock integration tests for HuggingFaceClient.
//!
//! These tests verify correct HTTP interaction and error handling using mocked responses.
#![cfg(feature = "huggingface")]

use std::time::Duration;

use petition_classifier::{HuggingFaceClient, PetitionError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "facebook/bart-large-mnli";

/// Test successful zero-shot classification request.
#[tokio::test]
async fn test_classify_success() {
    let mock_server = MockServer::start().await;

    let classify_response = serde_json::json!({
        "sequence": "Transformer exploded, no power",
        "labels": ["High", "Medium", "Low"],
        "scores": [0.85, 0.10, 0.05]
    });

    Mock::given(method("POST"))
        .and(path(format!("/models/{}", MODEL)))
        .and(header("Authorization", "Bearer test_key"))
        .and(body_json(serde_json::json!({
            "inputs": "Transformer exploded, no power",
            "parameters": {"candidate_labels": ["High", "Medium", "Low"]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(classify_response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HuggingFaceClient::with_base_url("test_key", mock_server.uri()).unwrap();
    let ranking = client
        .classify("Transformer exploded, no power", &["High", "Medium", "Low"])
        .await
        .expect("classify should succeed");

    assert_eq!(ranking.top().unwrap().label, "High");
    assert!((ranking.top().unwrap().score - 0.85).abs() < 0.001);
    assert_eq!(ranking.len(), 3);
}

/// The router API answers with a list of label/score objects.
#[tokio::test]
async fn test_classify_row_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{}", MODEL)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"label": "Police", "score": 0.7},
            {"label": "General", "score": 0.3}
        ])))
        .mount(&mock_server)
        .await;

    let client = HuggingFaceClient::with_base_url("test_key", mock_server.uri()).unwrap();
    let ranking = client.classify("Theft", &["General", "Police"]).await.unwrap();

    assert_eq!(ranking.top().unwrap().label, "Police");
}

/// Backend order is kept even if scores disagree with it.
#[tokio::test]
async fn test_classify_keeps_response_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "labels": ["Medium", "High"],
            "scores": [0.5, 0.5]
        })))
        .mount(&mock_server)
        .await;

    let client = HuggingFaceClient::with_base_url("test_key", mock_server.uri()).unwrap();
    let ranking = client.classify("text", &["High", "Medium"]).await.unwrap();

    assert_eq!(ranking.top().unwrap().label, "Medium");
}

/// Custom model IDs are used in the request path.
#[tokio::test]
async fn test_classify_custom_model() {
    let mock_server = MockServer::start().await;
    let model = "MoritzLaurer/deberta-v3-base-zeroshot-v2.0";

    Mock::given(method("POST"))
        .and(path(format!("/models/{}", model)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "labels": ["Low"],
            "scores": [1.0]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HuggingFaceClient::with_base_url("test_key", mock_server.uri())
        .unwrap()
        .model(model);
    assert_eq!(client.model_id(), model);
    client.classify("text", &["Low"]).await.unwrap();
}

/// Non-200 responses carry the status code and body.
#[tokio::test]
async fn test_server_error_embeds_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{}", MODEL)))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal inference failure"))
        .mount(&mock_server)
        .await;

    let client = HuggingFaceClient::with_base_url("test_key", mock_server.uri()).unwrap();
    let err = client.classify("text", &["High"]).await.unwrap_err();

    match &err {
        PetitionError::Api { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "internal inference failure");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(err.is_api_error());
    assert!(err.to_string().contains("500"));
}

/// Other 2xx statuses are still errors.
#[tokio::test]
async fn test_non_200_success_status_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&mock_server)
        .await;

    let client = HuggingFaceClient::with_base_url("test_key", mock_server.uri()).unwrap();
    let err = client.classify("text", &["High"]).await.unwrap_err();

    assert!(matches!(err, PetitionError::Api { status: 202, .. }));
}

/// An empty error body falls back to the status reason.
#[tokio::test]
async fn test_unauthorized_without_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = HuggingFaceClient::with_base_url("bad_key", mock_server.uri()).unwrap();
    let err = client.classify("text", &["High"]).await.unwrap_err();

    assert_eq!(err.to_string(), "API error (401): Unauthorized");
}

/// Slow responses hit the request timeout.
#[tokio::test]
async fn test_timeout_is_api_class_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(serde_json::json!({"labels": ["High"], "scores": [1.0]})),
        )
        .mount(&mock_server)
        .await;

    let client = HuggingFaceClient::with_base_url("test_key", mock_server.uri())
        .unwrap()
        .timeout(Duration::from_millis(200))
        .unwrap();
    let err = client.classify("text", &["High"]).await.unwrap_err();

    assert!(matches!(err, PetitionError::Http(_)));
    assert!(err.is_api_error());
    assert!(err.to_string().contains("timed out"));
}

/// A body that is not a zero-shot response is a transport-level failure.
#[tokio::test]
async fn test_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = HuggingFaceClient::with_base_url("test_key", mock_server.uri()).unwrap();
    let err = client.classify("text", &["High"]).await.unwrap_err();

    assert!(matches!(err, PetitionError::Http(_)));
}

/// Empty candidate sets never reach the network.
#[tokio::test]
async fn test_empty_labels_rejected_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = HuggingFaceClient::with_base_url("test_key", mock_server.uri()).unwrap();
    let err = client.classify("text", &[]).await.unwrap_err();

    assert!(matches!(err, PetitionError::InvalidInput(_)));
}

/// Trailing slashes on the base URL do not produce `//models`.
#[tokio::test]
async fn test_base_url_trailing_slash() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{}", MODEL)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "labels": ["Low"],
            "scores": [1.0]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base_url = format!("{}/", mock_server.uri());
    let client = HuggingFaceClient::with_base_url("test_key", base_url).unwrap();
    client.classify("text", &["Low"]).await.unwrap();
}
