use std::time::Duration;

use crate::helpers::{refused_address, spawn_fixture_server, test_fetcher};

const TIMEOUT: Duration = Duration::from_secs(1);

#[tokio::test]
async fn fetches_html_despite_robots_disallow() {
    let fixture = spawn_fixture_server();

    let html = test_fetcher()
        .fetch(&format!("{}/article", fixture), TIMEOUT)
        .await
        .expect("article should be fetched");

    assert!(html.contains("Rust release notes"));
}

#[tokio::test]
async fn follows_redirects() {
    let fixture = spawn_fixture_server();

    let html = test_fetcher()
        .fetch(&format!("{}/moved", fixture), TIMEOUT)
        .await
        .expect("redirect target should be fetched");

    assert!(html.contains("Fixture article"));
}

#[tokio::test]
async fn wraps_json_and_plain_text() {
    let fixture = spawn_fixture_server();
    let fetcher = test_fetcher();

    let json = fetcher
        .fetch(&format!("{}/data.json", fixture), TIMEOUT)
        .await
        .expect("json should be wrapped");
    assert_eq!(
        json,
        r#"<html><body><pre>{"status": "ok", "note": "&lt;b&gt;bold&lt;/b&gt;"}</pre></body></html>"#
    );

    let text = fetcher
        .fetch(&format!("{}/notes.txt", fixture), TIMEOUT)
        .await
        .expect("plain text should be wrapped");
    assert!(text.starts_with("<html><body><pre>Plain notes"));
}

#[tokio::test]
async fn returns_none_for_not_found() {
    let fixture = spawn_fixture_server();
    let page = test_fetcher()
        .fetch(&format!("{}/missing", fixture), TIMEOUT)
        .await;
    assert!(page.is_none());
}

#[tokio::test]
async fn returns_none_for_non_success_status() {
    let fixture = spawn_fixture_server();
    let page = test_fetcher()
        .fetch(&format!("{}/choices", fixture), TIMEOUT)
        .await;
    assert!(page.is_none());
}

#[tokio::test]
async fn returns_none_for_unsupported_content_type() {
    let fixture = spawn_fixture_server();
    let page = test_fetcher()
        .fetch(&format!("{}/report.pdf", fixture), TIMEOUT)
        .await;
    assert!(page.is_none());
}

#[tokio::test]
async fn returns_none_on_timeout() {
    let fixture = spawn_fixture_server();
    let page = test_fetcher()
        .fetch(&format!("{}/slow", fixture), TIMEOUT)
        .await;
    assert!(page.is_none());
}

#[tokio::test]
async fn returns_none_when_connection_is_refused() {
    let page = test_fetcher()
        .fetch(&format!("{}/article", refused_address()), TIMEOUT)
        .await;
    assert!(page.is_none());
}
