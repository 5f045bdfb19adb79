use std::time::Duration;

use async_openai::types::CreateChatCompletionRequest;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::configuration::OpenRouterSettings;

#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("model provider answered with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("{0}")]
    Connection(String),
    #[error("{0}")]
    Processing(String),
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        request: &CreateChatCompletionRequest,
    ) -> Result<Value, AnswerError>;
}

pub struct OpenRouterClient {
    client: Client,
    url: String,
    site_url: String,
    app_name: String,
    timeout: Duration,
}

impl OpenRouterClient {
    pub fn new(settings: &OpenRouterSettings) -> Self {
        OpenRouterClient {
            client: Client::new(),
            url: settings.completions_url(),
            site_url: settings.site_url.clone(),
            app_name: settings.app_name.clone(),
            timeout: settings.timeout(),
        }
    }
}

#[async_trait]
impl ChatBackend for OpenRouterClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &CreateChatCompletionRequest,
    ) -> Result<Value, AnswerError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.site_url)
            .header("X-Title", &self.app_name)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| AnswerError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnswerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AnswerError::Processing(e.to_string()))
    }
}
