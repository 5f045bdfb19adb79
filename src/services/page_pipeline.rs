use std::{future::Future, panic::AssertUnwindSafe};

use actix_web::web;
use futures::FutureExt;
use thiserror::Error;

use crate::{configuration::FetcherSettings, domain::page_digest::PageDigest};

use super::{extract, AnswerService, Fetcher};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to scrape website")]
    FetchFailed,
    #[error("internal pipeline failure: {0}")]
    Internal(String),
}

pub async fn scrape_page(
    fetcher: &Fetcher,
    settings: &FetcherSettings,
    url: &str,
) -> Result<PageDigest, PipelineError> {
    let html = fetcher
        .fetch(url, settings.timeout())
        .await
        .ok_or(PipelineError::FetchFailed)?;

    let max_length = settings.max_content_length;
    web::block(move || extract(&html, max_length))
        .await
        .map_err(|e| PipelineError::Internal(format!("extraction aborted: {}", e)))
}

pub async fn answer_page(
    fetcher: &Fetcher,
    answers: &AnswerService,
    settings: &FetcherSettings,
    url: &str,
    question: &str,
    model_key: &str,
) -> Result<String, PipelineError> {
    let digest = scrape_page(fetcher, settings, url).await?;
    Ok(answers.answer(question, &digest, model_key).await)
}

/// Turns a panic anywhere in `pipeline` into [`PipelineError::Internal`].
pub async fn guarded<T, F>(pipeline: F) -> Result<T, PipelineError>
where
    F: Future<Output = Result<T, PipelineError>>,
{
    match AssertUnwindSafe(pipeline).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => {
            let reason = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(PipelineError::Internal(reason))
        }
    }
}
