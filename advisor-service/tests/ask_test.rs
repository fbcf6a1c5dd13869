mod common;

use advisor_service::services::providers::mock::MockCompletionProvider;
use common::TestApp;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn ask_returns_the_answer_envelope() {
    let mock = Arc::new(MockCompletionProvider::replying(
        "## Visa Requirements\n- Valid passport",
    ));
    let app = TestApp::spawn_with_provider(mock.clone()).await;
    let client = Client::new();

    let response = client
        .post(&format!("{}/ask", app.address))
        .json(&json!({"question": "What visa do I need for Japan?"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["response"], "## Visa Requirements\n- Valid passport");
    assert_eq!(body["status"], "success");

    // Exactly one outbound call, carrying the question verbatim.
    assert_eq!(
        mock.questions(),
        vec!["What visa do I need for Japan?".to_string()]
    );
}

#[tokio::test]
async fn ask_rejects_empty_question() {
    let mock = Arc::new(MockCompletionProvider::replying("unused"));
    let app = TestApp::spawn_with_provider(mock.clone()).await;
    let client = Client::new();

    let response = client
        .post(&format!("{}/ask", app.address))
        .json(&json!({"question": ""}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["detail"], "Question cannot be empty");
    assert!(mock.questions().is_empty());
}

#[tokio::test]
async fn ask_rejects_whitespace_only_question() {
    let mock = Arc::new(MockCompletionProvider::replying("unused"));
    let app = TestApp::spawn_with_provider(mock.clone()).await;
    let client = Client::new();

    let response = client
        .post(&format!("{}/ask", app.address))
        .json(&json!({"question": "   "}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["detail"], "Question cannot be empty");
    assert!(mock.questions().is_empty());
}

#[tokio::test]
async fn ask_forwards_the_question_untrimmed() {
    let mock = Arc::new(MockCompletionProvider::replying("somewhere warm"));
    let app = TestApp::spawn_with_provider(mock.clone()).await;
    let client = Client::new();

    let response = client
        .post(&format!("{}/ask", app.address))
        .json(&json!({"question": "  Where should I go in June?  "}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        mock.questions(),
        vec!["  Where should I go in June?  ".to_string()]
    );
}

#[tokio::test]
async fn ask_maps_provider_failure_to_bad_gateway() {
    let mock = Arc::new(MockCompletionProvider::failing("connection reset"));
    let app = TestApp::spawn_with_provider(mock.clone()).await;
    let client = Client::new();

    let response = client
        .post(&format!("{}/ask", app.address))
        .json(&json!({"question": "Any question"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 502);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let detail = body["detail"].as_str().expect("detail should be a string");
    assert!(detail.contains("Groq API request failed"));
    assert!(detail.contains("connection reset"));
}
