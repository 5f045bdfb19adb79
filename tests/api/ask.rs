use std::sync::Arc;

use serde_json::{json, Value};
use zscraper::services::MISSING_CREDENTIAL;

use crate::helpers::{spawn_app, spawn_fixture_server, EchoBackend};

#[tokio::test]
async fn ask_answers_from_the_fetched_page() {
    let fixture = spawn_fixture_server();
    let backend = Arc::new(EchoBackend::default());
    let app = spawn_app(backend.clone(), Some("test-key"));

    let response = app
        .post_json(
            "/ask",
            &json!({
                "url": format!("{}/article", fixture),
                "question": "  What did Cargo gain?  ",
                "model": "Gemini"
            }),
        )
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    let answer = body["answer"].as_str().unwrap();

    assert!(answer.contains("Titles found on the page:\n- Rust release notes\n- Tooling"));
    assert!(answer.contains("Cargo gained a resolver mode"));
    assert!(!answer.contains("Copyright fixture"));
    assert!(answer.ends_with("Question:   What did Cargo gain?  "));
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn ask_rejects_incomplete_requests_before_fetching() {
    let backend = Arc::new(EchoBackend::default());
    let app = spawn_app(backend.clone(), Some("test-key"));

    let cases = [
        (json!({"question": "q", "model": "gemini"}), "URL not provided"),
        (json!({"url": "example.com", "model": "gemini"}), "Question not provided"),
        (json!({"url": "example.com", "question": "q"}), "Model not provided"),
        (
            json!({"url": "example.com", "question": "q", "model": "mystery"}),
            "Unknown model 'mystery'",
        ),
    ];

    for (request, expected) in cases {
        let response = app.post_json("/ask", &request).await;
        assert_eq!(400, response.status().as_u16(), "request: {}", request);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], expected);
    }
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn ask_rejects_malformed_json() {
    let app = spawn_app(Arc::new(EchoBackend::default()), Some("test-key"));

    let response = app
        .api_client
        .post(format!("{}/ask", app.address))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn ask_reports_fetch_failures_as_server_errors() {
    let fixture = spawn_fixture_server();
    let backend = Arc::new(EchoBackend::default());
    let app = spawn_app(backend.clone(), Some("test-key"));

    let response = app
        .post_json(
            "/ask",
            &json!({
                "url": format!("{}/missing", fixture),
                "question": "Anything?",
                "model": "deepseek"
            }),
        )
        .await;

    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to scrape website");
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn ask_without_credential_still_succeeds_at_transport_level() {
    let fixture = spawn_fixture_server();
    let backend = Arc::new(EchoBackend::default());
    let app = spawn_app(backend.clone(), None);

    let response = app
        .post_json(
            "/ask",
            &json!({
                "url": format!("{}/article", fixture),
                "question": "Anything?",
                "model": "ollama"
            }),
        )
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["answer"], MISSING_CREDENTIAL);
    assert_eq!(backend.calls(), 0);
}
