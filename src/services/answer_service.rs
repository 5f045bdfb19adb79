use std::sync::Arc;

use async_openai::{
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::domain::{
    model_selection::{find_model, ModelSelection},
    page_digest::PageDigest,
};

use super::{format_context, AnswerError, ChatBackend};

pub const MISSING_CREDENTIAL: &str = "Error: OPENROUTER_API_KEY is not configured in the backend.";
pub const UNEXPECTED_RESPONSE: &str = "Error: Received an unexpected response from the AI model.";

const SYSTEM_PROMPT: &str = "You are an AI assistant. Your task is to answer questions based *solely* on the provided webpage content. Do not use any external knowledge. If the answer is not found in the content, explicitly say so.";
const TEMPERATURE: f32 = 0.5;
const MAX_OUTPUT_TOKENS: u32 = 1500;
const QUESTION_PREVIEW_CHARS: usize = 100;

/// Never fails: every problem comes back as a readable message in place of
/// the answer.
pub struct AnswerService {
    api_key: Option<SecretString>,
    backend: Arc<dyn ChatBackend>,
}

impl AnswerService {
    pub fn new(api_key: Option<SecretString>, backend: Arc<dyn ChatBackend>) -> Self {
        if api_key.is_none() {
            log::warn!("OPENROUTER_API_KEY is not set. Every question will be answered with a configuration error.");
        }
        AnswerService { api_key, backend }
    }

    pub async fn answer(&self, question: &str, digest: &PageDigest, model_key: &str) -> String {
        let Some(api_key) = &self.api_key else {
            return MISSING_CREDENTIAL.to_string();
        };

        let model_key = model_key.trim().to_lowercase();
        let Some(provider) = find_model(&model_key) else {
            log::error!("Unknown model key: {}", model_key);
            return format!("Error: Unknown model '{}' selected.", model_key);
        };

        let request = match build_request(provider, question, digest) {
            Ok(request) => request,
            Err(e) => {
                log::error!("Failed to build request for {}: {}", provider.key, e);
                return processing_error(&e.to_string());
            }
        };

        log::info!(
            "Querying {} (model: {}) with prompt: {}...",
            provider.name,
            provider.model,
            question.chars().take(QUESTION_PREVIEW_CHARS).collect::<String>()
        );

        match self.backend.complete(api_key.expose_secret(), &request).await {
            Ok(body) => first_choice_content(&body).unwrap_or_else(|| {
                log::error!(
                    "Unexpected response structure for model {}: {}",
                    provider.key,
                    body
                );
                UNEXPECTED_RESPONSE.to_string()
            }),
            Err(e) => describe_failure(provider, e),
        }
    }
}

fn build_request(
    provider: &ModelSelection,
    question: &str,
    digest: &PageDigest,
) -> Result<CreateChatCompletionRequest, OpenAIError> {
    let prompt = user_prompt(question, &format_context(digest));

    CreateChatCompletionRequestArgs::default()
        .model(provider.model)
        .messages([
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_PROMPT)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        ])
        .temperature(TEMPERATURE)
        .max_tokens(MAX_OUTPUT_TOKENS)
        .build()
}

fn user_prompt(question: &str, context: &str) -> String {
    format!(
        "Answer the following question based on the provided webpage content. \
         If the question cannot be answered using ONLY the provided webpage content, \
         state that the information is not found in the provided context.\n\n\
         Webpage content:\n{}\n\n\
         Question: {}",
        context, question
    )
}

fn first_choice_content(body: &Value) -> Option<String> {
    body.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(str::to_string)
}

fn describe_failure(provider: &ModelSelection, error: AnswerError) -> String {
    match error {
        AnswerError::Status { status, body } => {
            log::error!(
                "HTTP error occurred for {}: {} - Response: {}",
                provider.key,
                status,
                body
            );
            format!(
                "API Error: Failed to communicate with the AI model ({}). Please try again.",
                status
            )
        }
        AnswerError::Connection(detail) => {
            log::error!("API request failed for {}: {}", provider.key, detail);
            format!(
                "API Error: Could not connect to the AI model provider. {}",
                detail
            )
        }
        AnswerError::Processing(detail) => {
            log::error!("Error processing {} response: {}", provider.key, detail);
            processing_error(&detail)
        }
    }
}

fn processing_error(detail: &str) -> String {
    format!(
        "Processing Error: An unexpected error occurred while handling the AI response. {}",
        detail
    )
}
