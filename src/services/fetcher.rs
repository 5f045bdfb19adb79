use std::time::Duration;

use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    redirect::Policy,
    Client, StatusCode,
};
use scraper::{ElementRef, Html, Selector};
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36 Edg/91.0.864.48 ZScraper/1.0";
const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8";

const CLIENT_RENDERING_HINTS: [&str; 4] = ["javascript", "react", "vue", "angular"];
const NON_RENDERED_TAGS: [&str; 3] = ["script", "style", "noscript"];
const RENDER_SAMPLE_CHARS: usize = 500;
const MIN_RENDERED_CHARS: usize = 100;

#[derive(Debug, PartialEq, Eq)]
enum Payload {
    Html,
    Text,
    Unsupported,
}

pub struct Fetcher {
    client: Client,
    robots_timeout: Duration,
}

impl Fetcher {
    pub fn new(robots_timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9"),
        );
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(header::DNT, HeaderValue::from_static("1"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(Policy::limited(10))
            .build()?;

        Ok(Fetcher {
            client,
            robots_timeout,
        })
    }

    pub async fn fetch(&self, url: &str, timeout: Duration) -> Option<String> {
        let url = normalize_url(url);
        log::info!("Attempting to fetch URL: {}", url);

        self.probe_robots(&url).await;

        let response = match self.client.get(&url).timeout(timeout).send().await {
            Ok(response) => response,
            Err(e) => {
                log_transport_error(&url, &e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            log::error!("HTTP error for {}: {}", url, status);
            return None;
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_lowercase();

        let payload = payload_kind(&content_type);
        if payload == Payload::Unsupported {
            log::warn!(
                "URL {} does not return HTML content. Content-Type: {}",
                url,
                content_type
            );
            return None;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                log_transport_error(&url, &e);
                return None;
            }
        };

        if payload == Payload::Text {
            log::warn!("Wrapping {} body from {} as preformatted text", content_type, url);
            return Some(wrap_in_html(&body));
        }

        if looks_client_rendered(&body) {
            log::warn!(
                "URL {} might rely on client-side JavaScript for rendering. Scraped content might be incomplete.",
                url
            );
        }

        log::info!("Successfully fetched HTML from {}. Content length: {}", url, body.len());
        Some(body)
    }

    /// Advisory only: a site-wide disallow is logged and the fetch goes ahead.
    async fn probe_robots(&self, url: &str) {
        let Some(robots_url) = robots_url(url) else {
            return;
        };

        match self
            .client
            .get(&robots_url)
            .timeout(self.robots_timeout)
            .send()
            .await
        {
            Ok(response) if response.status() == StatusCode::OK => match response.text().await {
                Ok(body) if disallows_everyone(&body) => log::warn!(
                    "robots.txt at {} disallows all scraping. Proceeding with caution.",
                    robots_url
                ),
                Ok(_) => {}
                Err(e) => log::info!("Could not read robots.txt at {}: {}", robots_url, e),
            },
            Ok(response) => log::info!(
                "No usable robots.txt at {} (status {})",
                robots_url,
                response.status()
            ),
            Err(e) => log::info!("Could not fetch robots.txt for {}: {}", url, e),
        }
    }
}

pub fn normalize_url(raw: &str) -> String {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => raw.to_string(),
        _ if !raw.contains("://") => format!("https://{}", raw),
        _ => raw.to_string(),
    }
}

fn robots_url(url: &str) -> Option<String> {
    let robots = Url::parse(url).ok()?.join("/robots.txt").ok()?;
    Some(robots.to_string())
}

fn disallows_everyone(robots: &str) -> bool {
    let mut wildcard_agent = false;
    let mut root_disallow = false;

    for line in robots.lines() {
        let Some((directive, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.split('#').next().unwrap_or_default().trim();
        match directive.trim().to_lowercase().as_str() {
            "user-agent" if value == "*" => wildcard_agent = true,
            "disallow" if value == "/" => root_disallow = true,
            _ => {}
        }
    }

    wildcard_agent && root_disallow
}

fn payload_kind(content_type: &str) -> Payload {
    if content_type.contains("text/html") {
        Payload::Html
    } else if content_type.contains("application/json") || content_type.contains("text/plain") {
        Payload::Text
    } else {
        Payload::Unsupported
    }
}

fn wrap_in_html(text: &str) -> String {
    let escaped = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!("<html><body><pre>{}</pre></body></html>", escaped)
}

fn looks_client_rendered(raw_html: &str) -> bool {
    let document = Html::parse_document(raw_html);
    let sample_len = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .map(|body| {
            body.descendants()
                .filter_map(|node| {
                    let text = node.value().as_text()?;
                    let parent = node.parent().and_then(ElementRef::wrap)?;
                    (!NON_RENDERED_TAGS.contains(&parent.value().name())).then_some(text.trim())
                })
                .collect::<String>()
                .chars()
                .take(RENDER_SAMPLE_CHARS)
                .count()
        })
        .unwrap_or(0);

    if sample_len >= MIN_RENDERED_CHARS {
        return false;
    }

    let lowered = raw_html.to_lowercase();
    CLIENT_RENDERING_HINTS
        .iter()
        .any(|hint| lowered.contains(hint))
}

fn log_transport_error(url: &str, e: &reqwest::Error) {
    if e.is_timeout() {
        log::error!("Timeout error for {}: {}", url, e);
    } else if e.is_connect() {
        log::error!("Connection error for {}: {}", url, e);
    } else {
        log::error!("Request error for {}: {}", url, e);
    }
}
