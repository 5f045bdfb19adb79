use std::sync::Arc;

use secrecy::SecretString;
use zscraper::{
    configuration::OpenRouterSettings,
    domain::page_digest::PageDigest,
    services::{AnswerService, OpenRouterClient},
};

use crate::helpers::{refused_address, spawn_fixture_server};

fn service_for(base_url: String) -> AnswerService {
    let settings = OpenRouterSettings {
        api_key: None,
        base_url,
        site_url: "http://localhost:9002".to_string(),
        app_name: "ZScraper".to_string(),
        timeout_secs: 5,
    };
    AnswerService::new(
        Some(SecretString::from("test-key".to_string())),
        Arc::new(OpenRouterClient::new(&settings)),
    )
}

fn digest() -> PageDigest {
    PageDigest {
        paragraphs: vec!["Some page text.".to_string()],
        ..Default::default()
    }
}

#[tokio::test]
async fn sends_credentials_and_site_headers() {
    let fixture = spawn_fixture_server();
    let answer = service_for(format!("{}/ok", fixture))
        .answer("Who?", &digest(), "gemini")
        .await;

    assert_eq!(
        answer,
        "Bearer test-key | ZScraper | http://localhost:9002 | google/gemini-pro-1.5"
    );
}

#[tokio::test]
async fn error_status_is_reported_with_code() {
    let fixture = spawn_fixture_server();
    let answer = service_for(format!("{}/broken", fixture))
        .answer("Who?", &digest(), "gemini")
        .await;

    assert_eq!(
        answer,
        "API Error: Failed to communicate with the AI model (503). Please try again."
    );
}

#[tokio::test]
async fn unparseable_body_is_a_processing_error() {
    let fixture = spawn_fixture_server();
    let answer = service_for(format!("{}/garbled", fixture))
        .answer("Who?", &digest(), "gemini")
        .await;

    assert!(answer.starts_with(
        "Processing Error: An unexpected error occurred while handling the AI response."
    ));
}

#[tokio::test]
async fn unreachable_provider_is_a_connection_error() {
    let answer = service_for(refused_address())
        .answer("Who?", &digest(), "gemini")
        .await;

    assert!(answer.starts_with("API Error: Could not connect to the AI model provider."));
}
