pub mod ask_route;
pub mod default_route;
pub mod models_route;
pub mod scrape_route;

use actix_web::HttpResponse;
use serde::Serialize;

use crate::services::PipelineError;

pub const INTERNAL_ERROR: &str = "An internal error occurred";

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorBody {
        error: message.into(),
    })
}

pub fn pipeline_failure(error: PipelineError) -> HttpResponse {
    let message = match error {
        error @ PipelineError::FetchFailed => error.to_string(),
        PipelineError::Internal(reason) => {
            log::error!("Request pipeline failed: {}", reason);
            INTERNAL_ERROR.to_string()
        }
    };
    HttpResponse::InternalServerError().json(ErrorBody { error: message })
}

/// A required body field, passed through untouched. Blank counts as missing.
pub fn required(value: Option<String>, missing: &str) -> Result<String, String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| missing.to_string())
}
