pub mod answer_service;
pub mod context_formatter;
pub mod extractor;
pub mod fetcher;
pub mod openrouter_client;
pub mod page_pipeline;

pub use answer_service::*;
pub use context_formatter::*;
pub use extractor::extract;
pub use fetcher::*;
pub use openrouter_client::*;
pub use page_pipeline::*;
